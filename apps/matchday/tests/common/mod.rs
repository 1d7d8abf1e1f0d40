#![allow(dead_code)]

pub mod proptest_prelude;

// Logging is auto-installed for every test binary that includes `mod common`
#[ctor::ctor]
fn init_logging() {
    matchday_test_support::logging::init();
}

// Every test builds its own in-memory database, so commit is the default.
// Flip per run with `MATCHDAY_TXN_POLICY=rollback`.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = match std::env::var("MATCHDAY_TXN_POLICY")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "rollback" => matchday::db::txn_policy::TxnPolicy::RollbackOnOk,
        _ => matchday::db::txn_policy::TxnPolicy::CommitOnOk,
    };

    matchday::db::txn_policy::set_txn_policy(policy);
}
