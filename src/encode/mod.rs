pub mod bitset;
pub mod encoder;

pub use bitset::ItemBitset;
pub use encoder::{
    encode, encode_one_hot, encode_str_rows, MembershipMatrix, TransactionContext, Vocabulary,
};
