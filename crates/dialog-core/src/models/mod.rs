//! Data models exchanged with the dialog service

mod counterexample;
mod dialog_node;
mod entity;
mod entity_value;
mod example;
mod intent;
mod log;
mod message;
mod pagination;
mod synonym;
mod workspace;

pub use counterexample::*;
pub use dialog_node::*;
pub use entity::*;
pub use entity_value::*;
pub use example::*;
pub use intent::*;
pub use log::*;
pub use message::*;
pub use pagination::*;
pub use synonym::*;
pub use workspace::*;

pub type WorkspaceCollection = Collection<Workspace>;
pub type IntentCollection = Collection<Intent>;
pub type ExampleCollection = Collection<Example>;
pub type CounterexampleCollection = Collection<Counterexample>;
pub type EntityCollection = Collection<Entity>;
pub type ValueCollection = Collection<EntityValue>;
pub type SynonymCollection = Collection<Synonym>;
pub type DialogNodeCollection = Collection<DialogNode>;
