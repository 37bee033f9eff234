//! Unit-test logging, shared with the integration tests through
//! `contaminados_test_support`. Level comes from `TEST_LOG`, then `RUST_LOG`,
//! then `warn`.

pub fn init() {
    contaminados_test_support::logging::init();
}
