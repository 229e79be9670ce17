pub mod intrusive_list;
pub mod key_order;
pub mod node_slab;

pub use intrusive_list::IntrusiveList;
pub use key_order::KeyOrder;
pub use node_slab::NodeId;
