// Resume upload, AI cleanup, per-change review, and final export.
// The pure edit engine lives in `revision`; these handlers wire it to
// uploads, the cleaner, and Postgres.

pub mod handlers;
