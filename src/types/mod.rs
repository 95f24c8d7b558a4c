//! Core types for tracked entities and their geometry

pub mod entities;
pub mod geometry;
pub mod labels;
