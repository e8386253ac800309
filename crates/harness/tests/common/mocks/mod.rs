//! Mock implementations of the harness seams.
