//! Serializers for caption clips.

pub mod vtt;
