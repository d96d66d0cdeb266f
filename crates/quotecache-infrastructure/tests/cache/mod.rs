//! Store wiring integration tests
