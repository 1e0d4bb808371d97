mod app_cfg;
mod app_fns;
mod arg_parse;
mod errors;
mod router;

//exports
pub use app_cfg::{AppCfg, OutputCfg, ReportVerbosity, RoutingCfg};
pub use app_fns::*;
pub use errors::AppError;
