pub mod change;
pub mod price;
pub mod product;

pub use change::*;
pub use price::*;
pub use product::*;
