use keyed_dom::{
	demo::ListDemo,
	mount::{FullRebuild, MountDriver},
	surface::{ElementId, MemorySurface},
};
use tracing_subscriber::EnvFilter;

pub type KeyedDemo = ListDemo<MemorySurface, MountDriver<ElementId>>;
pub type RebuildDemo = ListDemo<MemorySurface, FullRebuild<ElementId>>;

/// Routes logs through the test harness. Set `RUST_LOG` to see them.
pub fn init_logging() {
	//TODO: Fail on Warning or Error.
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

#[allow(dead_code)]
pub fn keyed() -> KeyedDemo {
	init_logging();
	ListDemo::new(MemorySurface::new(), MountDriver::default())
}

#[allow(dead_code)]
pub fn rebuilt() -> RebuildDemo {
	init_logging();
	ListDemo::new(MemorySurface::new(), FullRebuild::default())
}
