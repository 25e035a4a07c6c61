//! Registry integration tests: randomized operation sequences and saved-value
//! round trips.
