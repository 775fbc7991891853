//! Cross-field and range rules that a presence table cannot express.

use slurm_client_sdk::{
    AccountAssociationRequest, AccountCreate, AssociationCreate, AssociationUpdate,
    JobAllocateRequest, JobCreate, JobUpdate, QosCreate, QosUpdate, ReservationCreate,
    ReservationUpdate, TresMap,
};

use super::Violation;

/// Longest grace period Slurm accepts, in seconds (one week).
pub const MAX_GRACE_TIME: u32 = 604_800;

const DEPENDENCY_TYPES: &[&str] = &[
    "after",
    "afterany",
    "aftercorr",
    "afternotok",
    "afterok",
    "expand",
    "singleton",
    "burstbuffer",
];

fn fail(field: &'static str, message: String) -> Result<(), Violation> {
    Err(Violation::new(Some(field), message))
}

fn not_own_parent(
    kind: &str,
    name: &str,
    parent: &str,
    field: &'static str,
) -> Result<(), Violation> {
    if !parent.is_empty() && parent == name {
        return fail(field, format!("{kind} cannot be its own parent"));
    }
    Ok(())
}

fn default_qos_allowed(default_qos: &str, qos_list: &[String]) -> Result<(), Violation> {
    if !default_qos.is_empty() && !qos_list.is_empty() && !qos_list.iter().any(|q| q == default_qos)
    {
        return fail(
            "default_qos",
            format!("default QoS {default_qos} must be in the allowed QoS list"),
        );
    }
    Ok(())
}

fn tres_non_negative(field: &'static str, tres: &TresMap) -> Result<(), Violation> {
    match tres.iter().find(|(_, count)| **count < 0) {
        Some((key, count)) => fail(field, format!("TRES {key} count cannot be negative ({count})")),
        None => Ok(()),
    }
}

fn nodes_ordered(min: Option<u32>, max: Option<u32>) -> Result<(), Violation> {
    match (min, max) {
        (Some(min), Some(max)) if max > 0 && min > max => fail(
            "min_nodes",
            format!("min nodes ({min}) cannot exceed max nodes ({max})"),
        ),
        _ => Ok(()),
    }
}

fn cpus_per_task_positive(cpus: Option<u32>) -> Result<(), Violation> {
    if cpus == Some(0) {
        return fail("cpus_per_task", "cpus per task must be positive".to_owned());
    }
    Ok(())
}

/// # Errors
/// Returns the first violated account rule.
pub fn account_create(a: &AccountCreate) -> Result<(), Violation> {
    not_own_parent("account", &a.name, &a.parent_account, "parent_account")?;
    if let (Some(per_user), Some(max)) = (a.max_jobs_per_user, a.max_jobs)
        && per_user > max
    {
        return fail(
            "max_jobs_per_user",
            format!("max jobs per user ({per_user}) cannot exceed max jobs ({max})"),
        );
    }
    if let (Some(cpus), Some(tres_cpus)) = (a.max_cpus, a.max_tres.get("cpu"))
        && i64::from(cpus) != *tres_cpus
    {
        return fail(
            "max_cpus",
            format!("MaxCPUs ({cpus}) and MaxTRES[cpu] ({tres_cpus}) should be consistent"),
        );
    }
    default_qos_allowed(&a.default_qos, &a.qos_list)?;
    tres_non_negative("max_tres", &a.max_tres)?;
    tres_non_negative("grp_tres", &a.grp_tres)
}

/// # Errors
/// Returns the first violated rule.
pub fn account_association(r: &AccountAssociationRequest) -> Result<(), Violation> {
    if !r.parent_account.is_empty() && r.accounts.contains(&r.parent_account) {
        return fail(
            "parent_account",
            "account cannot be its own parent".to_owned(),
        );
    }
    default_qos_allowed(&r.default_qos, &r.qos_list)
}

/// # Errors
/// Returns the first violated association rule.
pub fn association_create(a: &AssociationCreate) -> Result<(), Violation> {
    not_own_parent("association", &a.account, &a.parent_account, "parent_account")?;
    default_qos_allowed(&a.default_qos, &a.qos_list)?;
    tres_non_negative("max_tres", &a.max_tres)?;
    tres_non_negative("grp_tres", &a.grp_tres)
}

/// # Errors
/// Returns the first violated association rule.
pub fn association_update(u: &AssociationUpdate) -> Result<(), Violation> {
    if let (Some(default_qos), Some(qos_list)) = (&u.default_qos, &u.qos_list) {
        default_qos_allowed(default_qos, qos_list)?;
    }
    if let Some(tres) = &u.max_tres {
        tres_non_negative("max_tres", tres)?;
    }
    if let Some(tres) = &u.grp_tres {
        tres_non_negative("grp_tres", tres)?;
    }
    Ok(())
}

fn array_expression(expr: &str) -> Result<(), Violation> {
    let valid = expr
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | ',' | ':' | '%'));
    if expr.is_empty() || valid {
        return Ok(());
    }
    fail("array", format!("invalid array expression '{expr}'"))
}

fn dependency_expression(expr: &str) -> Result<(), Violation> {
    if expr.is_empty() {
        return Ok(());
    }
    let clause_ok = |clause: &str| {
        let mut parts = clause.trim().split(':');
        let kind = parts.next().unwrap_or_default();
        if !DEPENDENCY_TYPES.contains(&kind) {
            return false;
        }
        let ids: Vec<&str> = parts.collect();
        if kind == "singleton" {
            return ids.is_empty();
        }
        !ids.is_empty() && ids.iter().all(|id| id.parse::<u32>().is_ok_and(|n| n > 0))
    };
    if expr.split(',').all(clause_ok) {
        return Ok(());
    }
    fail("dependency", format!("invalid dependency expression '{expr}'"))
}

/// # Errors
/// Returns the first violated job rule.
pub fn job_create(j: &JobCreate) -> Result<(), Violation> {
    nodes_ordered(j.min_nodes, j.max_nodes)?;
    cpus_per_task_positive(j.cpus_per_task)?;
    array_expression(&j.array)?;
    dependency_expression(&j.dependency)
}

/// # Errors
/// Returns the first violated job rule.
pub fn job_update(u: &JobUpdate) -> Result<(), Violation> {
    nodes_ordered(u.min_nodes, u.max_nodes)
}

/// # Errors
/// Returns the first violated allocation rule.
pub fn job_allocate(r: &JobAllocateRequest) -> Result<(), Violation> {
    cpus_per_task_positive(r.cpus_per_task)
}

struct QosLimits<'a> {
    name: Option<&'a str>,
    grace_time: Option<u32>,
    usage_factor: Option<f64>,
    usage_threshold: Option<f64>,
    max_jobs_per_user: Option<u32>,
    max_jobs_per_account: Option<u32>,
    preempt_list: Option<&'a [String]>,
}

fn qos_limits(q: &QosLimits<'_>) -> Result<(), Violation> {
    if let Some(grace) = q.grace_time
        && grace > MAX_GRACE_TIME
    {
        return fail(
            "grace_time",
            format!("grace time ({grace}) cannot exceed {MAX_GRACE_TIME} seconds"),
        );
    }
    if q.usage_factor.is_some_and(|f| f < 0.0) {
        return fail("usage_factor", "usage factor cannot be negative".to_owned());
    }
    if q
        .usage_threshold
        .is_some_and(|t| !(0.0..=1.0).contains(&t))
    {
        return fail(
            "usage_threshold",
            "usage threshold must be between 0 and 1".to_owned(),
        );
    }
    if let (Some(per_user), Some(per_account)) = (q.max_jobs_per_user, q.max_jobs_per_account)
        && per_user > per_account
    {
        return fail(
            "max_jobs_per_user",
            "max jobs per user cannot exceed max jobs per account".to_owned(),
        );
    }
    if let (Some(name), Some(list)) = (q.name, q.preempt_list)
        && list.iter().any(|p| p == name)
    {
        return fail("preempt_list", "QoS cannot preempt itself".to_owned());
    }
    Ok(())
}

/// # Errors
/// Returns the first violated QoS rule.
pub fn qos_create(q: &QosCreate) -> Result<(), Violation> {
    qos_limits(&QosLimits {
        name: Some(&q.name),
        grace_time: q.grace_time,
        usage_factor: q.usage_factor,
        usage_threshold: q.usage_threshold,
        max_jobs_per_user: q.max_jobs_per_user,
        max_jobs_per_account: q.max_jobs_per_account,
        preempt_list: Some(&q.preempt_list),
    })?;
    tres_non_negative("max_tres_per_user", &q.max_tres_per_user)?;
    tres_non_negative("max_tres_per_job", &q.max_tres_per_job)
}

/// # Errors
/// Returns the first violated QoS rule.
pub fn qos_update(u: &QosUpdate) -> Result<(), Violation> {
    qos_limits(&QosLimits {
        name: None,
        grace_time: u.grace_time,
        usage_factor: u.usage_factor,
        usage_threshold: u.usage_threshold,
        max_jobs_per_user: u.max_jobs_per_user,
        max_jobs_per_account: u.max_jobs_per_account,
        preempt_list: u.preempt_list.as_deref(),
    })
}

/// # Errors
/// Returns the first violated reservation rule.
pub fn reservation_create(r: &ReservationCreate) -> Result<(), Violation> {
    if r.duration.is_none() && r.end_time.is_none() {
        return fail("duration", "either duration or end time is required".to_owned());
    }
    if let (Some(start), Some(end)) = (r.start_time, r.end_time)
        && end < start
    {
        return fail("end_time", "end time cannot be before start time".to_owned());
    }
    if r.accounts.is_empty() && r.users.is_empty() {
        return fail(
            "accounts",
            "at least one of accounts or users is required".to_owned(),
        );
    }
    Ok(())
}

/// # Errors
/// Returns the first violated reservation rule.
pub fn reservation_update(u: &ReservationUpdate) -> Result<(), Violation> {
    if let (Some(start), Some(end)) = (u.start_time, u.end_time)
        && end < start
    {
        return fail("end_time", "end time cannot be before start time".to_owned());
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;

    fn account(name: &str) -> AccountCreate {
        AccountCreate {
            name: name.to_owned(),
            ..AccountCreate::default()
        }
    }

    #[test]
    fn account_limits_are_consistent() {
        let a = AccountCreate {
            max_jobs: Some(10),
            max_jobs_per_user: Some(20),
            ..account("physics")
        };
        let v = account_create(&a).unwrap_err();
        assert!(
            v.message
                .contains("max jobs per user (20) cannot exceed max jobs (10)")
        );

        let a = AccountCreate {
            parent_account: "self".to_owned(),
            ..account("self")
        };
        assert!(
            account_create(&a)
                .unwrap_err()
                .message
                .contains("cannot be its own parent")
        );

        let mut a = account("physics");
        a.max_cpus = Some(8);
        a.max_tres.insert("cpu".to_owned(), 16);
        assert_eq!(
            account_create(&a).unwrap_err().message,
            "MaxCPUs (8) and MaxTRES[cpu] (16) should be consistent"
        );
    }

    #[test]
    fn default_qos_must_be_allowed() {
        let a = AccountCreate {
            default_qos: "high".to_owned(),
            qos_list: vec!["normal".to_owned()],
            ..account("physics")
        };
        assert_eq!(
            account_create(&a).unwrap_err().message,
            "default QoS high must be in the allowed QoS list"
        );
    }

    #[test]
    fn negative_tres_rejected() {
        let mut a = AssociationCreate {
            account: "physics".to_owned(),
            ..AssociationCreate::default()
        };
        a.grp_tres.insert("mem".to_owned(), -1);
        assert_eq!(association_create(&a).unwrap_err().field, Some("grp_tres"));
    }

    #[test]
    fn job_expressions() {
        let job = |array: &str, dependency: &str| JobCreate {
            script: "#!/bin/sh\n".to_owned(),
            array: array.to_owned(),
            dependency: dependency.to_owned(),
            ..JobCreate::default()
        };
        assert!(job_create(&job("1-10%2", "afterok:12:13,singleton")).is_ok());
        assert!(job_create(&job("1-10x", "")).is_err());
        assert!(job_create(&job("", "afterok")).is_err());
        assert!(job_create(&job("", "afterok:0")).is_err());
        assert!(job_create(&job("", "whenever:12")).is_err());

        let j = JobCreate {
            min_nodes: Some(4),
            max_nodes: Some(2),
            ..JobCreate::default()
        };
        assert_eq!(
            job_create(&j).unwrap_err().message,
            "min nodes (4) cannot exceed max nodes (2)"
        );
    }

    #[test]
    fn qos_ranges() {
        let q = QosCreate {
            name: "normal".to_owned(),
            grace_time: Some(MAX_GRACE_TIME + 1),
            ..QosCreate::default()
        };
        assert_eq!(qos_create(&q).unwrap_err().field, Some("grace_time"));

        let q = QosCreate {
            name: "normal".to_owned(),
            usage_threshold: Some(1.5),
            ..QosCreate::default()
        };
        assert_eq!(qos_create(&q).unwrap_err().field, Some("usage_threshold"));

        let q = QosCreate {
            name: "normal".to_owned(),
            preempt_list: vec!["normal".to_owned()],
            ..QosCreate::default()
        };
        assert_eq!(
            qos_create(&q).unwrap_err().message,
            "QoS cannot preempt itself"
        );
    }

    #[test]
    fn reservation_window() {
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0);
        let r = ReservationCreate {
            start_time: start,
            users: vec!["alice".to_owned()],
            ..ReservationCreate::default()
        };
        assert_eq!(reservation_create(&r).unwrap_err().field, Some("duration"));

        let r = ReservationCreate {
            end_time: DateTime::<Utc>::from_timestamp(1_600_000_000, 0),
            ..r
        };
        assert_eq!(reservation_create(&r).unwrap_err().field, Some("end_time"));

        let r = ReservationCreate {
            start_time: start,
            duration: Some(60),
            ..ReservationCreate::default()
        };
        assert_eq!(reservation_create(&r).unwrap_err().field, Some("accounts"));
    }
}
