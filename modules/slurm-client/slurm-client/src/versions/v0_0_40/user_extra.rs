//! The default account and WCKey sit in a nested `default` record.

use slurm_client_sdk::{User, UserCreate, UserUpdate};

use crate::convert::value;
use crate::wire::v0_0_40::{User as WireUser, UserDefault};

pub fn read(w: &WireUser, e: &mut User) {
    if let Some(default) = &w.default {
        e.default_account = value::read(&default.account);
        e.default_wckey = value::read(&default.wckey);
    }
}

pub fn write(e: &User, w: &mut WireUser) {
    w.default = defaults(&e.default_account, &e.default_wckey);
}

pub fn write_create(c: &UserCreate, w: &mut WireUser) {
    w.default = defaults(&c.default_account, &c.default_wckey);
}

pub fn write_update(u: &UserUpdate, w: &mut WireUser) {
    if u.default_account.is_some() || u.default_wckey.is_some() {
        w.default = Some(UserDefault {
            account: u.default_account.clone(),
            wckey: u.default_wckey.clone(),
        });
    }
}

fn defaults(account: &str, wckey: &str) -> Option<UserDefault> {
    let named = |s: &str| (!s.is_empty()).then(|| s.to_owned());
    let default = UserDefault {
        account: named(account),
        wckey: named(wckey),
    };
    (default != UserDefault::default()).then_some(default)
}

#[cfg(test)]
pub fn retain(e: &User, r: &mut User) {
    r.default_account.clone_from(&e.default_account);
    r.default_wckey.clone_from(&e.default_wckey);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_defaults_are_omitted() {
        let mut w = WireUser::default();
        write_create(&UserCreate::default(), &mut w);
        assert!(w.default.is_none());
    }

    #[test]
    fn update_sends_only_given_defaults() {
        let mut w = WireUser::default();
        write_update(
            &UserUpdate {
                default_account: Some("physics".to_owned()),
                ..UserUpdate::default()
            },
            &mut w,
        );
        let default = w.default.unwrap();
        assert_eq!(default.account.as_deref(), Some("physics"));
        assert!(default.wckey.is_none());
    }
}
