//! Strategies for fields whose wire shape is a nested record.

/// Coordinator records on the wire, user or account names in the model.
pub mod coordinators {
    use crate::wire::common::Coord;

    #[must_use]
    pub fn read(w: &Option<Vec<Coord>>) -> Vec<String> {
        w.iter()
            .flatten()
            .filter_map(|c| c.name.clone())
            .filter(|n| !n.is_empty())
            .collect()
    }

    #[must_use]
    pub fn write(v: &[String]) -> Option<Vec<Coord>> {
        (!v.is_empty()).then(|| {
            v.iter()
                .map(|name| Coord {
                    name: Some(name.clone()),
                    direct: None,
                })
                .collect()
        })
    }
}

pub mod coordinators_opt {
    use crate::wire::common::Coord;

    #[must_use]
    pub fn read(w: &Option<Vec<Coord>>) -> Option<Vec<String>> {
        w.as_ref().map(|_| super::coordinators::read(w))
    }

    #[must_use]
    pub fn write(v: &Option<Vec<String>>) -> Option<Vec<Coord>> {
        v.as_deref()
            .map(|names| super::coordinators::write(names).unwrap_or_default())
    }
}

/// `administrator_level` is a one-element list on the wire.
pub mod admin_level {
    use slurm_client_sdk::AdminLevel;

    #[must_use]
    pub fn read(w: &Option<Vec<String>>) -> AdminLevel {
        w.iter()
            .flatten()
            .map(|s| AdminLevel::parse(s))
            .find(|level| *level != AdminLevel::Unknown)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn write(v: &AdminLevel) -> Option<Vec<String>> {
        match v {
            AdminLevel::None | AdminLevel::Unknown => None,
            level => Some(vec![level.as_str().to_owned()]),
        }
    }
}

pub mod admin_level_opt {
    use slurm_client_sdk::AdminLevel;

    #[must_use]
    pub fn read(w: &Option<Vec<String>>) -> Option<AdminLevel> {
        w.as_ref().map(|_| super::admin_level::read(w))
    }

    /// `Some(None)` is written explicitly so that it can demote a user.
    #[must_use]
    pub fn write(v: &Option<AdminLevel>) -> Option<Vec<String>> {
        v.filter(|level| *level != AdminLevel::Unknown)
            .map(|level| vec![level.as_str().to_owned()])
    }
}

/// Verbose exit record on the wire, the return code in the model.
pub mod exit_code {
    use crate::noval::{NoVal, decode};
    use crate::wire::common::ProcessExitCode;

    #[must_use]
    pub fn read(w: &Option<ProcessExitCode>) -> i32 {
        decode(w.as_ref().and_then(|e| e.return_code.as_ref()))
    }

    #[must_use]
    pub fn write(v: &i32) -> Option<ProcessExitCode> {
        Some(ProcessExitCode {
            return_code: Some(NoVal::set(*v)),
            ..ProcessExitCode::default()
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use slurm_client_sdk::AdminLevel;

    use super::*;
    use crate::noval::NoVal;
    use crate::wire::common::{Coord, ProcessExitCode};

    #[test]
    fn coordinator_names() {
        let wire = Some(vec![
            Coord {
                name: Some("alice".to_owned()),
                direct: Some(true),
            },
            Coord::default(),
        ]);
        assert_eq!(coordinators::read(&wire), vec!["alice".to_owned()]);
        assert_eq!(coordinators_opt::write(&Some(vec![])), Some(vec![]));
        assert_eq!(coordinators::write(&[]), None);
    }

    #[test]
    fn admin_level_is_first_known_entry() {
        let wire = Some(vec!["Operator".to_owned()]);
        assert_eq!(admin_level::read(&wire), AdminLevel::Operator);
        assert_eq!(admin_level::read(&None), AdminLevel::None);
        assert_eq!(admin_level::write(&AdminLevel::None), None);
        assert_eq!(
            admin_level_opt::write(&Some(AdminLevel::None)),
            Some(vec!["None".to_owned()])
        );
    }

    #[test]
    fn exit_code_reads_return_code() {
        let wire = Some(ProcessExitCode {
            status: Some(vec!["EXITED".to_owned()]),
            return_code: Some(NoVal::set(3)),
            signal: None,
        });
        assert_eq!(exit_code::read(&wire), 3);
        assert_eq!(exit_code::read(&None), 0);
        assert_eq!(exit_code::read(&exit_code::write(&-1)), -1);
    }
}
