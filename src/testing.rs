//! Testing utilities for computations and parameter documents.
//!
//! - **Builders**: [`DocumentBuilder`] assembles documents column by column
//! - **Fixtures**: ready-made documents and recording computations
//! - **Assertions**: compare output columns with expected values
//! - **Mock I/O**: [`MemoryDocument`] and temporary document files
//!
//! # Quick Start
//!
//! ```
//! use paramio::testing::*;
//! use paramio::{Adapter, builtins};
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = DocumentBuilder::new()
//!     .vectorized("a", [1, 2, 3])
//!     .vectorized("b", [10, 20, 30])
//!     .output("c")
//!     .build();
//!
//! let out = Adapter::default().run(&doc, &builtins::add())?;
//! assert_output_values(&out, "c", [11, 22, 33]);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use mock_io::*;
