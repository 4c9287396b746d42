/*!
 * Monitoring Module
 * Structured tracing setup for the supervisor
 */

mod tracer;

pub use tracer::init_tracing;
