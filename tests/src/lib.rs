//! End-to-end tests of whole relay list runs.

#[cfg(test)]
mod pipeline;
