pub mod bindings;
pub mod extract;
pub mod setup_py;

pub use bindings::{collect_bindings, Binding, Bindings};
pub use extract::{extract_parameters, Parameters};
pub use setup_py::read_setup_py;
