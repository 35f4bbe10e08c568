mod env;
pub use env::{Env, EnvVar};

mod flag;
pub use flag::Flag;

mod labels;
pub use labels::Labels;
