//! CoverWatch: certificate-of-insurance intake and expiry notification.
//!
//! Two entrypoints share this library: the webhook service that turns
//! uploaded certificates into structured policy records (`api` + `pipeline`),
//! and the scheduled nag cycle that reminds vendors of expiring coverage
//! (`notify`). Supabase (storage + PostgREST), Gemini, and Resend are
//! external collaborators reached over HTTP behind the seams in `db`,
//! `pipeline`, and `notify`.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod notify;
pub mod pipeline;
