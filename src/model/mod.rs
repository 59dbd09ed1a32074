mod metric;
mod package;
mod store;
mod verdict;

pub use metric::{MetricPoint, MetricSeries};
pub use package::{Flavor, LookupPath, PackageFormat, ScannedBinary};
pub use store::{SizeStore, TIMESTAMP_KEY};
pub use verdict::{Status, Verdict, WarningTrigger};
