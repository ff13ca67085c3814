pub mod contour;
pub mod interpolation;
pub mod tensor;

pub use contour::{iso_segments, IsoSegment};
pub use interpolation::{linspace, upsample_bilinear};
pub use tensor::{principal_vectors, EigenError, EigenPairs2, PrincipalVectors, SymmetricTensor2};
