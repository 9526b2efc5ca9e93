//! Edge worker artifacts: routing rule, script template and deployment result.

mod result;
mod routing;
mod template;

pub use result::DeploymentResult;
pub use routing::{
    classify_user_agent, RoutingDecision, RoutingReason, RoutingRule, VisitRequest,
};
pub use template::{render_worker, MAIN_MODULE};
