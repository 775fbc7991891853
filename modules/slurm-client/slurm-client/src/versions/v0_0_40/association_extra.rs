//! The default QoS sits in a nested `default` record and the job and TRES
//! limits under `max`.

use slurm_client_sdk::{Association, AssociationCreate, AssociationUpdate};

use crate::convert::{nonempty, noval, noval_opt, tres, tres_opt, value};
use crate::noval::NoVal;
use crate::wire::common::Tres;
use crate::wire::v0_0_40::{
    AssocDefault, AssocJobsPer, AssocMax, AssocMaxJobs, AssocMaxTres, AssocTresPer,
    Association as WireAssociation,
};

/// The limits the model carries, lifted out of `max`.
struct Limits {
    max_jobs: Option<NoVal<u32>>,
    max_submit_jobs: Option<NoVal<u32>>,
    grp_jobs: Option<NoVal<u32>>,
    max_wall_time: Option<NoVal<u32>>,
    max_tres: Option<Vec<Tres>>,
    grp_tres: Option<Vec<Tres>>,
}

impl Limits {
    fn of(max: Option<&AssocMax>) -> Self {
        let jobs = max.and_then(|m| m.jobs.as_ref());
        let per_job = jobs.and_then(|j| j.per.as_ref());
        let tres = max.and_then(|m| m.tres.as_ref());
        Self {
            max_jobs: jobs.and_then(|j| j.active),
            max_submit_jobs: jobs.and_then(|j| j.total),
            grp_jobs: per_job.and_then(|p| p.count),
            max_wall_time: per_job.and_then(|p| p.wall_clock),
            max_tres: tres
                .and_then(|t| t.per.as_ref())
                .and_then(|p| p.job.clone()),
            grp_tres: tres.and_then(|t| t.total.clone()),
        }
    }

    fn into_wire(self) -> Option<AssocMax> {
        let jobs = AssocMaxJobs {
            active: self.max_jobs,
            total: self.max_submit_jobs,
            per: nonempty(AssocJobsPer {
                count: self.grp_jobs,
                wall_clock: self.max_wall_time,
                ..AssocJobsPer::default()
            }),
            ..AssocMaxJobs::default()
        };
        let tres = AssocMaxTres {
            per: nonempty(AssocTresPer {
                job: self.max_tres,
                ..AssocTresPer::default()
            }),
            total: self.grp_tres,
        };
        nonempty(AssocMax {
            jobs: nonempty(jobs),
            tres: nonempty(tres),
        })
    }
}

pub fn read(w: &WireAssociation, e: &mut Association) {
    if let Some(default) = &w.default {
        e.default_qos = value::read(&default.qos);
    }
    let limits = Limits::of(w.max.as_ref());
    e.max_jobs = noval::read(&limits.max_jobs);
    e.max_submit_jobs = noval::read(&limits.max_submit_jobs);
    e.grp_jobs = noval::read(&limits.grp_jobs);
    e.max_wall_time = noval::read(&limits.max_wall_time);
    e.max_tres = tres::read(&limits.max_tres);
    e.grp_tres = tres::read(&limits.grp_tres);
}

pub fn write(e: &Association, w: &mut WireAssociation) {
    w.default = default_qos(&e.default_qos);
    w.max = Limits {
        max_jobs: noval::write(&e.max_jobs),
        max_submit_jobs: noval::write(&e.max_submit_jobs),
        grp_jobs: noval::write(&e.grp_jobs),
        max_wall_time: noval::write(&e.max_wall_time),
        max_tres: tres::write(&e.max_tres),
        grp_tres: tres::write(&e.grp_tres),
    }
    .into_wire();
}

pub fn write_create(c: &AssociationCreate, w: &mut WireAssociation) {
    w.default = default_qos(&c.default_qos);
    w.max = Limits {
        max_jobs: noval_opt::write(&c.max_jobs),
        max_submit_jobs: noval_opt::write(&c.max_submit_jobs),
        grp_jobs: noval_opt::write(&c.grp_jobs),
        max_wall_time: noval_opt::write(&c.max_wall_time),
        max_tres: tres::write(&c.max_tres),
        grp_tres: tres::write(&c.grp_tres),
    }
    .into_wire();
}

pub fn write_update(u: &AssociationUpdate, w: &mut WireAssociation) {
    if let Some(qos) = &u.default_qos {
        w.default = Some(AssocDefault {
            qos: Some(qos.clone()),
        });
    }
    w.max = Limits {
        max_jobs: noval_opt::write(&u.max_jobs),
        max_submit_jobs: noval_opt::write(&u.max_submit_jobs),
        grp_jobs: noval_opt::write(&u.grp_jobs),
        max_wall_time: noval_opt::write(&u.max_wall_time),
        max_tres: tres_opt::write(&u.max_tres),
        grp_tres: tres_opt::write(&u.grp_tres),
    }
    .into_wire();
}

fn default_qos(qos: &str) -> Option<AssocDefault> {
    (!qos.is_empty()).then(|| AssocDefault {
        qos: Some(qos.to_owned()),
    })
}

#[cfg(test)]
pub fn retain(e: &Association, r: &mut Association) {
    r.default_qos.clone_from(&e.default_qos);
    r.max_jobs = e.max_jobs;
    r.max_submit_jobs = e.max_submit_jobs;
    r.grp_jobs = e.grp_jobs;
    r.max_wall_time = e.max_wall_time;
    r.max_tres.clone_from(&e.max_tres);
    r.grp_tres.clone_from(&e.grp_tres);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn limits_decode_from_nested_max() {
        let w: WireAssociation = serde_json::from_value(json!({
            "account": "physics",
            "max": {
                "jobs": {
                    "active": {"set": true, "infinite": false, "number": 50},
                    "total": {"set": true, "infinite": false, "number": 200},
                    "per": {
                        "count": {"set": true, "infinite": false, "number": 400},
                        "wall_clock": {"set": true, "infinite": false, "number": 1440}
                    }
                },
                "tres": {
                    "total": [{"type": "cpu", "count": 1024}],
                    "per": {"job": [{"type": "gres", "name": "gpu", "count": 8}]}
                }
            }
        }))
        .unwrap();
        let mut e = Association::default();
        read(&w, &mut e);
        assert_eq!(e.max_jobs, 50);
        assert_eq!(e.max_submit_jobs, 200);
        assert_eq!(e.grp_jobs, 400);
        assert_eq!(e.max_wall_time, 1440);
        assert_eq!(e.grp_tres.get("cpu"), Some(&1024));
        assert_eq!(e.max_tres.get("gres/gpu"), Some(&8));
    }

    #[test]
    fn update_nests_only_given_limits() {
        let mut w = WireAssociation::default();
        write_update(
            &AssociationUpdate {
                max_jobs: Some(0),
                ..AssociationUpdate::default()
            },
            &mut w,
        );
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            json!({"max": {"jobs": {"active": {"set": true, "infinite": false, "number": 0}}}})
        );

        let mut untouched = WireAssociation::default();
        write_update(&AssociationUpdate::default(), &mut untouched);
        assert!(untouched.max.is_none());
    }
}
