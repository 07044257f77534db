//! Primary (mine) and secondary uranium supply

mod data;
mod primary;
mod secondary;

pub use data::{
    Mine, MineProduction, MineYearProduction, PrimarySupplyRow, SecondarySupply, SecondarySupplyRow,
};
pub use primary::build_primary_supply;
pub use secondary::build_secondary_supply;
