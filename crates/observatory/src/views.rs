//! Server-side shaping of the rows behind the dashboard's tables.
//!
//! Each view turns raw records into display rows with their navigation
//! targets already worked out, so the client only has to render them.
pub mod inferences;
pub mod links;
pub mod tags;
