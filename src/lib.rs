//! # qrforge
//!
//! A Rust library for generating byte mode QR codes (ISO/IEC 18004) with Reed-Solomon
//! error correction, rendered straight to RGBA pixel buffers.
//!
//! ## Features
//!
//! - **Automatic sizing**: Picks the smallest version that fits the payload, then the
//!   strongest error correction level that still fits in it
//! - **Reed-Solomon Error Correction**: Levels L, M, Q and H
//! - **Mask selection**: All 8 mask patterns are scored, optionally in parallel
//! - **Rendering**: Exact pixel size output with a configurable quiet zone and colors,
//!   encodable as PNG or JPEG
//!
//! ## Quick Start
//!
//! ```rust
//! use qrforge::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Only the data is required, everything else has defaults
//! let img = QRBuilder::new(b"Hello, World!").render()?;
//! assert_eq!(img.dimensions(), (100, 100));
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use image::Rgba;
//! use qrforge::{encode_image, ECLevel, ImageFormat, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = QRBuilder::new(b"https://example.com")
//!     .ec_level(ECLevel::M)                 // Minimum error correction level, defaults to L
//!     .dimensions(300)                      // Output width and height in pixels, defaults to 100
//!     .border(6)                            // Quiet zone in modules, at least 4
//!     .background(Rgba([255, 255, 255, 255]))
//!     .foreground(Rgba([20, 20, 80, 255]))
//!     .render()?;
//!
//! let png = encode_image(&img, ImageFormat::Png)?;
//! assert_eq!(&png[1..4], b"PNG");
//! # Ok(())
//! # }
//! ```
//!
//! ### Inspecting the symbol
//!
//! ```rust
//! use qrforge::{ECLevel, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new(b"TEST 123").build()?;
//! assert_eq!(*symbol.version(), 1);
//! assert_eq!(symbol.ec_level(), ECLevel::Q); // Raised from L, the version had room
//! println!("{}", qrforge::render::to_str(&symbol, 1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Input
//!
//! Payloads must be non-empty and only hold printable ASCII (0x20 to 0x7E).
//!
//! ## Error Correction Levels
//! - **L (Very low)**: ~7% error correction
//! - **M (Low)**: ~15% error correction
//! - **Q (Medium)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Environment
//! - `QRFORGE_DEBUG`: print a short report of every build to stderr
//! - `QRFORGE_PARALLEL_MASKS`: `0` scores mask candidates sequentially, default `1`
//! - `QRFORGE_PARALLEL_MIN_VERSION`: smallest version scored in parallel, default `7`

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{encode, QRBuilder, SymbolTemplate, TemplateCache};
pub use common::ec::{GaloisField, QR_REDUCER};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use common::version_db::{BlockCountInfo, BlockInfo, CodeVersion, ErrorCorrectionInfo};
pub use render::{encode_image, write_image, ImageFormat};
