mod page;
pub use self::page::PageEnvelope;

mod car;
pub use self::car::{CarID, CarRecord};

mod category;
pub use self::category::{BodyType, FuelType, UnknownToken};
