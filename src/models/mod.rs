pub mod education;
pub mod experience;
pub mod interest;
pub mod profile;
pub mod project;
pub mod publication;

pub use education::{EducationEntry, Scalar};
pub use experience::ExperienceEntry;
pub use interest::InterestCategory;
pub use profile::{Profile, ProfileLink};
pub use project::Project;
pub use publication::{Links, Publication};
