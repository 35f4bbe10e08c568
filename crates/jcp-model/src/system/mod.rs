mod scheduler;
pub use scheduler::{ContainerRuntime, SchedulerType};

mod exec_system;
pub use exec_system::ExecSystem;
