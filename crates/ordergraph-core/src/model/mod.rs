pub mod address;
pub mod delivery;
pub mod line_item;
pub mod member;
pub mod order;
pub mod product;
pub mod views;

pub use address::Address;
pub use delivery::{Delivery, DeliveryStatus};
pub use line_item::LineItem;
pub use member::Member;
pub use order::{Order, OrderStatus};
pub use product::Product;
pub use views::{
    Association, BareLineItem, BareOrder, FlatRow, LineItemDto, LineItemView, OrderAggregate,
    OrderDto, OrderHeader, OrderSummaryDto,
};
