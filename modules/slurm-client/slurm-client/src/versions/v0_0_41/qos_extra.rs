//! QoS limits live under `limits.max` and preemption under `preempt`.
//!
//! `max.jobs.active_jobs.per` bounds running jobs while `max.jobs.per`
//! bounds submitted ones.

use slurm_client_sdk::{Qos, QosCreate, QosUpdate};

use crate::convert::{flags, flags_opt, nonempty, noval, noval_opt, opt, tres, tres_opt, value};
use crate::noval::NoVal;
use crate::wire::common::Tres;
use crate::wire::v0_0_41::{
    Qos as WireQos, QosActiveJobs, QosLimits, QosMax, QosMaxJobs, QosMaxTres, QosPer,
    QosPreempt, QosTresPer, QosWallClock, QosWallClockPer,
};

/// The limits the model carries, lifted out of `limits`.
struct Limits {
    grace_time: Option<u32>,
    jobs_per_user: Option<NoVal<u32>>,
    jobs_per_account: Option<NoVal<u32>>,
    submit_per_user: Option<NoVal<u32>>,
    wall_per_job: Option<NoVal<u32>>,
    tres_per_job: Option<Vec<Tres>>,
    tres_per_user: Option<Vec<Tres>>,
}

impl Limits {
    fn of(limits: Option<&QosLimits>) -> Self {
        let max = limits.and_then(|l| l.max.as_ref());
        let jobs = max.and_then(|m| m.jobs.as_ref());
        let active = jobs
            .and_then(|j| j.active_jobs.as_ref())
            .and_then(|a| a.per.as_ref());
        let tres = max
            .and_then(|m| m.tres.as_ref())
            .and_then(|t| t.per.as_ref());
        Self {
            grace_time: limits.and_then(|l| l.grace_time),
            jobs_per_user: active.and_then(|p| p.user),
            jobs_per_account: active.and_then(|p| p.account),
            submit_per_user: jobs.and_then(|j| j.per.as_ref()).and_then(|p| p.user),
            wall_per_job: max
                .and_then(|m| m.wall_clock.as_ref())
                .and_then(|w| w.per.as_ref())
                .and_then(|p| p.job),
            tres_per_job: tres.and_then(|t| t.job.clone()),
            tres_per_user: tres.and_then(|t| t.user.clone()),
        }
    }

    fn into_wire(self) -> Option<QosLimits> {
        let jobs = QosMaxJobs {
            active_jobs: nonempty(QosActiveJobs {
                per: nonempty(QosPer {
                    account: self.jobs_per_account,
                    user: self.jobs_per_user,
                }),
            }),
            per: nonempty(QosPer {
                user: self.submit_per_user,
                ..QosPer::default()
            }),
            ..QosMaxJobs::default()
        };
        let tres = QosMaxTres {
            per: nonempty(QosTresPer {
                job: self.tres_per_job,
                user: self.tres_per_user,
                ..QosTresPer::default()
            }),
            ..QosMaxTres::default()
        };
        let wall_clock = QosWallClock {
            per: nonempty(QosWallClockPer {
                job: self.wall_per_job,
                ..QosWallClockPer::default()
            }),
        };
        nonempty(QosLimits {
            grace_time: self.grace_time,
            max: nonempty(QosMax {
                jobs: nonempty(jobs),
                tres: nonempty(tres),
                wall_clock: nonempty(wall_clock),
            }),
            ..QosLimits::default()
        })
    }
}

fn preempt(mode: Option<Vec<String>>, list: Option<Vec<String>>) -> Option<QosPreempt> {
    nonempty(QosPreempt {
        list,
        mode,
        ..QosPreempt::default()
    })
}

pub fn read(w: &WireQos, e: &mut Qos) {
    let limits = Limits::of(w.limits.as_ref());
    e.grace_time = value::read(&limits.grace_time);
    e.max_jobs_per_user = noval::read(&limits.jobs_per_user);
    e.max_jobs_per_account = noval::read(&limits.jobs_per_account);
    e.max_submit_jobs_per_user = noval::read(&limits.submit_per_user);
    e.max_wall_time_per_job = noval::read(&limits.wall_per_job);
    e.max_tres_per_job = tres::read(&limits.tres_per_job);
    e.max_tres_per_user = tres::read(&limits.tres_per_user);
    if let Some(p) = &w.preempt {
        e.preempt_mode = flags::read(&p.mode);
        e.preempt_list = value::read(&p.list);
    }
}

pub fn write(e: &Qos, w: &mut WireQos) {
    w.limits = Limits {
        grace_time: value::write(&e.grace_time),
        jobs_per_user: noval::write(&e.max_jobs_per_user),
        jobs_per_account: noval::write(&e.max_jobs_per_account),
        submit_per_user: noval::write(&e.max_submit_jobs_per_user),
        wall_per_job: noval::write(&e.max_wall_time_per_job),
        tres_per_job: tres::write(&e.max_tres_per_job),
        tres_per_user: tres::write(&e.max_tres_per_user),
    }
    .into_wire();
    w.preempt = preempt(
        flags::write(&e.preempt_mode),
        value::write(&e.preempt_list),
    );
}

pub fn write_create(c: &QosCreate, w: &mut WireQos) {
    w.limits = Limits {
        grace_time: opt::write(&c.grace_time),
        jobs_per_user: noval_opt::write(&c.max_jobs_per_user),
        jobs_per_account: noval_opt::write(&c.max_jobs_per_account),
        submit_per_user: noval_opt::write(&c.max_submit_jobs_per_user),
        wall_per_job: noval_opt::write(&c.max_wall_time_per_job),
        tres_per_job: tres::write(&c.max_tres_per_job),
        tres_per_user: tres::write(&c.max_tres_per_user),
    }
    .into_wire();
    w.preempt = preempt(
        flags::write(&c.preempt_mode),
        value::write(&c.preempt_list),
    );
}

pub fn write_update(u: &QosUpdate, w: &mut WireQos) {
    w.limits = Limits {
        grace_time: opt::write(&u.grace_time),
        jobs_per_user: noval_opt::write(&u.max_jobs_per_user),
        jobs_per_account: noval_opt::write(&u.max_jobs_per_account),
        submit_per_user: noval_opt::write(&u.max_submit_jobs_per_user),
        wall_per_job: noval_opt::write(&u.max_wall_time_per_job),
        tres_per_job: tres_opt::write(&u.max_tres_per_job),
        tres_per_user: tres_opt::write(&u.max_tres_per_user),
    }
    .into_wire();
    w.preempt = preempt(
        flags_opt::write(&u.preempt_mode),
        opt::write(&u.preempt_list),
    );
}

#[cfg(test)]
pub fn retain(e: &Qos, r: &mut Qos) {
    r.grace_time = e.grace_time;
    r.max_jobs_per_user = e.max_jobs_per_user;
    r.max_jobs_per_account = e.max_jobs_per_account;
    r.max_submit_jobs_per_user = e.max_submit_jobs_per_user;
    r.max_wall_time_per_job = e.max_wall_time_per_job;
    r.max_tres_per_job.clone_from(&e.max_tres_per_job);
    r.max_tres_per_user.clone_from(&e.max_tres_per_user);
    r.preempt_mode.clone_from(&e.preempt_mode);
    r.preempt_list.clone_from(&e.preempt_list);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;
    use slurm_client_sdk::PreemptMode;

    use super::*;

    #[test]
    fn running_and_submit_limits_come_from_different_records() {
        let w: WireQos = serde_json::from_value(json!({
            "name": "normal",
            "preempt": {"list": ["low"], "mode": ["REQUEUE"], "exempt_time": {"set": false}},
            "limits": {
                "grace_time": 300,
                "factor": {"set": false},
                "max": {
                    "active_jobs": {"accruing": {"set": false}},
                    "jobs": {
                        "active_jobs": {"per": {
                            "user": {"set": true, "infinite": false, "number": 10},
                            "account": {"set": true, "infinite": false, "number": 100}
                        }},
                        "per": {"user": {"set": true, "infinite": false, "number": 5}}
                    },
                    "wall_clock": {"per": {"job": {"set": true, "infinite": false, "number": 720}}},
                    "tres": {"per": {
                        "job": [{"type": "cpu", "count": 64}],
                        "user": [{"type": "gres", "name": "gpu", "count": 4}]
                    }}
                }
            }
        }))
        .unwrap();
        let mut e = Qos::default();
        read(&w, &mut e);
        assert_eq!(e.grace_time, 300);
        assert_eq!(e.max_jobs_per_user, 10);
        assert_eq!(e.max_jobs_per_account, 100);
        assert_eq!(e.max_submit_jobs_per_user, 5);
        assert_eq!(e.max_wall_time_per_job, 720);
        assert_eq!(e.max_tres_per_job.get("cpu"), Some(&64));
        assert_eq!(e.max_tres_per_user.get("gres/gpu"), Some(&4));
        assert_eq!(e.preempt_mode, vec![PreemptMode::Requeue]);
        assert_eq!(e.preempt_list, vec!["low".to_owned()]);
    }

    #[test]
    fn update_writes_only_the_touched_branch() {
        let mut w = WireQos::default();
        write_update(
            &QosUpdate {
                max_submit_jobs_per_user: Some(0),
                preempt_list: Some(Vec::new()),
                ..QosUpdate::default()
            },
            &mut w,
        );
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            json!({
                "limits": {"max": {"jobs": {"per": {
                    "user": {"set": true, "infinite": false, "number": 0}
                }}}},
                "preempt": {"list": []}
            })
        );
    }
}
