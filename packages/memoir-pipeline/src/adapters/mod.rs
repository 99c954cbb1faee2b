mod contact;
mod life_event;
mod message;
mod note;
mod task;
mod thread;

pub use contact::ContactAdapter;
pub use life_event::LifeEventAdapter;
pub use message::ThreadMessageAdapter;
pub use note::NoteAdapter;
pub use task::TaskAdapter;
pub use thread::ThreadAdapter;
