// Row types, request/response DTOs, and domain enums

pub mod metric;
pub mod plan;
pub mod session;
pub mod template;

pub use metric::*;
pub use plan::*;
pub use session::*;
pub use template::*;
