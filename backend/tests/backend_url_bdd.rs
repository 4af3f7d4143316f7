//! Behaviour tests for backend base URL resolution.
//!
//! These scenarios pin the precedence between `API_BASE_URL`, `BACKEND_URL`
//! and the per-build defaults.

use mockable::MockEnv;
use oncare_gateway::outbound::backend::{
    API_BASE_URL_ENV, BACKEND_URL_ENV, BackendUrlError, BuildMode, backend_base_url_from_env,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::collections::HashMap;
use url::Url;

struct BackendUrlWorld {
    vars: RefCell<HashMap<String, String>>,
    mode: RefCell<BuildMode>,
    outcome: RefCell<Option<Result<Url, BackendUrlError>>>,
}

impl BackendUrlWorld {
    fn new() -> Self {
        Self {
            vars: RefCell::new(HashMap::new()),
            mode: RefCell::new(BuildMode::Release),
            outcome: RefCell::new(None),
        }
    }

    fn set_env_var(&self, name: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    fn evaluate(&self) {
        let env = mock_env(self.vars.borrow().clone());
        let result = backend_base_url_from_env(&env, *self.mode.borrow());
        *self.outcome.borrow_mut() = Some(result);
    }
}

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn world() -> BackendUrlWorld {
    BackendUrlWorld::new()
}

#[given("a release build")]
fn a_release_build(world: &BackendUrlWorld) {
    *world.mode.borrow_mut() = BuildMode::Release;
}

#[given("a debug build")]
fn a_debug_build(world: &BackendUrlWorld) {
    *world.mode.borrow_mut() = BuildMode::Debug;
}

#[given("API_BASE_URL is set to {value}")]
fn api_base_url_is_set(world: &BackendUrlWorld, value: String) {
    world.set_env_var(API_BASE_URL_ENV, &value);
}

#[given("BACKEND_URL is set to {value}")]
fn backend_url_is_set(world: &BackendUrlWorld, value: String) {
    world.set_env_var(BACKEND_URL_ENV, &value);
}

#[when("the backend URL is resolved")]
fn the_backend_url_is_resolved(world: &BackendUrlWorld) {
    world.evaluate();
}

#[then("the backend URL is {expected}")]
fn the_backend_url_is(world: &BackendUrlWorld, expected: String) {
    let outcome = world.outcome.borrow();
    let url = outcome
        .as_ref()
        .expect("evaluation result")
        .as_ref()
        .expect("expected resolution to succeed");
    assert_eq!(url.as_str(), expected);
}

#[then("resolution fails naming API_BASE_URL")]
fn resolution_fails_naming_api_base_url(world: &BackendUrlWorld) {
    let outcome = world.outcome.borrow();
    let error = match outcome.as_ref().expect("evaluation result") {
        Ok(url) => panic!("expected resolution to fail, got {url}"),
        Err(error) => error,
    };
    assert!(matches!(
        error,
        BackendUrlError::InvalidUrl {
            source_name: API_BASE_URL_ENV,
            ..
        }
    ));
}

#[scenario(path = "tests/features/backend_url.feature")]
fn backend_url_scenarios(world: BackendUrlWorld) {
    drop(world);
}
