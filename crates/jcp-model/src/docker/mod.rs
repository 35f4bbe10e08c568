mod mount;
pub use mount::{Mount, MountKind};

mod spec;
pub use spec::DockerRunSpec;
