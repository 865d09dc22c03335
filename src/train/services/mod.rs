//! Orchestration service for the train lifecycle and switch-list planning.

mod train_service;

pub use train_service::{
    CreateTrainInput, TrainService, TrainServiceError, TrainServiceResult, UpdateTrainInput,
};
