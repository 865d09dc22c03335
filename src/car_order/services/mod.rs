//! Orchestration service for car-demand generation and order management.

mod car_order_service;

pub use car_order_service::{
    CarOrderFilters, CarOrderService, CarOrderServiceError, CarOrderServiceResult,
    CreateOrderInput, GenerateOrdersInput, GenerateOrdersResult, GenerateOrdersSummaryEntry,
    UpdateOrderPatch,
};
