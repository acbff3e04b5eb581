//! Application services for registry maintenance, resolution and dispatch.

mod dispatcher;
mod refresher;
mod registry;
mod resolver;

pub use dispatcher::{
    ACKNOWLEDGEMENT_TEMPLATES, DispatchOutcome, Dispatcher, acknowledge, execution_id_from_body,
    render_acknowledgement,
};
pub use refresher::{DEFAULT_REFRESH_INTERVAL, RefreshError, RefreshOutcome, RegistryRefresher};
pub use registry::CommandRegistry;
pub use resolver::Resolver;
