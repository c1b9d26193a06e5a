//! Value Objects - Immutable, identity-less domain primitives

mod audio_format;
mod proficiency_level;
mod scratch_file_name;

pub use audio_format::AudioFormat;
pub use proficiency_level::ProficiencyLevel;
pub use scratch_file_name::ScratchFileName;
