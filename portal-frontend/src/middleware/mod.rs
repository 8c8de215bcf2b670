pub mod page_gate;

pub use page_gate::{
    policy_for, protected_page, wrap, AccessDecision, AccessPolicy, AllowAll, PageGate,
    SessionPolicy,
};
