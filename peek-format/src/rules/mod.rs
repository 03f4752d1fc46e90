// Rendering rules

pub mod dates;
pub mod grouping;
pub mod indentation;
pub mod markup;
pub mod numbers;
pub mod strings;

pub use dates::*;
pub use grouping::*;
pub use indentation::*;
pub use markup::*;
pub use numbers::*;
pub use strings::*;
