mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod car;
pub use self::car::{CarQuery, CarSortBy, RangeFilter};
