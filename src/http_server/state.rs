//! Shared handler state

use crate::auth::AuthService;
use crate::model::Predictor;
use crate::validation::Validator;

/// Everything handlers need, shared behind an `Arc`
pub struct AppState {
    pub auth: AuthService,
    pub predictor: Predictor,
    pub validator: Validator,
}

impl AppState {
    pub fn new(auth: AuthService, predictor: Predictor, validator: Validator) -> Self {
        Self {
            auth,
            predictor,
            validator,
        }
    }
}
