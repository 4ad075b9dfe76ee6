pub mod lookup;

pub use lookup::{
    get_defined_token_info, get_dexscreener_token_info, get_token_info, TokenLookup,
};
