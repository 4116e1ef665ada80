// Training module - ns-train orchestration and post-training export dispatch

mod session;
mod snapshot;

pub use session::{
    build_train_args, dispatch_export, run_training, split_overrides, ExportDispatch,
    TrainOptions, DEFERRED_OVERRIDE_PREFIX,
};
pub use snapshot::ParameterSnapshot;
