use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info, info_span, warn};

use rxqa_badges::{Session, SubmissionOutcome, sort_for_display};
use rxqa_guard::{AccessToken, Loaded, SessionStore, WindowStatus, access_link};
use rxqa_model::{FieldName, FieldTags, FormValues, TagSet};
use rxqa_rules::{EngineOptions, FieldViolations, RuleContext, RuleEngine, SubmissionContext};

use crate::cli::{BadgesArgs, FormArgs, SessionArgs, SubmitArgs, TokenArgs};
use crate::logging::{log_data_enabled, redact_value};
use crate::types::{BadgesReport, FieldReport, FormReport, IntegritySignals, SubmitReport};

/// Form snapshot from the command-line values.
pub fn form_values(args: &FormArgs) -> FormValues {
    FormValues::new()
        .with(FieldName::Medication, args.medication.as_str())
        .with(FieldName::DateOfBirth, args.date_of_birth.as_str())
        .with(FieldName::Weight, args.weight.as_str())
        .with(FieldName::Dosage, args.dosage.as_str())
        .with(FieldName::Frequency, args.frequency.as_str())
}

pub fn build_engine(args: &FormArgs) -> RuleEngine {
    let mut context = RuleContext::new().with_options(EngineOptions {
        log_values: log_data_enabled(),
    });
    if let Some(today) = args.today {
        context = context.with_today(today);
    }
    RuleEngine::with_context(context)
}

fn form_report(
    form: &FormValues,
    detections: &FieldTags,
    violations: &FieldViolations,
    newly_earned: &FieldTags,
    form_tags: &TagSet,
) -> FormReport {
    let fields = form
        .iter()
        .map(|(field, value)| FieldReport {
            field,
            value: value.to_string(),
            tags: detections
                .get(&field)
                .map(sort_for_display)
                .unwrap_or_default(),
            messages: violations
                .get(&field)
                .map(|found| found.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
            new_tags: newly_earned.get(&field).cloned().unwrap_or_default(),
        })
        .collect();
    FormReport {
        fields,
        form_tags: sort_for_display(form_tags),
    }
}

/// Evaluate a form without a session.
pub fn run_check(args: &FormArgs) -> Result<FormReport> {
    let engine = build_engine(args);
    let form = form_values(args);
    debug!(
        medication = redact_value(form.get(FieldName::Medication)),
        "Checking form"
    );
    let detections = engine.detect_all(&form);
    let violations = engine.validate_all(&form);
    let form_tags = engine.detect_form(&SubmissionContext::submit_control(), &detections, &form);
    Ok(form_report(
        &form,
        &detections,
        &violations,
        &FieldTags::new(),
        &form_tags,
    ))
}

/// Load the session at `path` and queue any integrity signal the store
/// reports on it.
pub fn open_session(path: &Path) -> Result<(SessionStore, Session, IntegritySignals)> {
    let mut store = SessionStore::new(path);
    let loaded: Loaded<Session> = store
        .load()
        .with_context(|| format!("load session {}", path.display()))?;

    let mut session = loaded.state.unwrap_or_default();
    if loaded.tampered {
        session.report_tampering();
    }
    if loaded.concurrent_session {
        session.report_concurrent_session();
    }
    let signals = IntegritySignals {
        tampered: loaded.tampered,
        concurrent_session: loaded.concurrent_session,
    };
    Ok((store, session, signals))
}

pub fn run_submit(args: &SubmitArgs) -> Result<SubmitReport> {
    let path = &args.session.session_file;
    let span = info_span!("submit", session = %path.display());
    let _guard = span.enter();

    let (mut store, mut session, signals) = open_session(path)?;
    let engine = build_engine(&args.form);
    let form = form_values(&args.form);
    let submission = if args.enter {
        SubmissionContext::enter_key()
    } else {
        SubmissionContext::submit_control()
    };

    let SubmissionOutcome {
        detections,
        violations,
        form_tags,
        newly_earned,
        newly_earned_form,
    } = session.submit(&engine, &form, &submission);

    let revision = store
        .save(&session)
        .with_context(|| format!("save session {}", path.display()))?;

    Ok(SubmitReport {
        form: form_report(&form, &detections, &violations, &newly_earned, &form_tags),
        new_form_tags: newly_earned_form,
        session_file: path.clone(),
        revision,
        total_badges: session.total(),
        signals,
    })
}

pub fn run_badges(args: &BadgesArgs) -> Result<BadgesReport> {
    let path = &args.session.session_file;
    let (mut store, session, signals) = open_session(path)?;
    if signals.any() {
        // Persist the queued flags so the next submission still sees them.
        store
            .save(&session)
            .with_context(|| format!("save session {}", path.display()))?;
    }
    Ok(BadgesReport {
        session,
        session_file: path.clone(),
        signals,
    })
}

pub fn run_reset(args: &SessionArgs) -> Result<()> {
    let path = &args.session_file;
    let mut store = SessionStore::new(path);
    store
        .clear()
        .with_context(|| format!("clear session {}", path.display()))?;
    info!(session = %path.display(), "Session reset");
    Ok(())
}

pub fn run_token_encode(args: &TokenArgs) -> Result<String> {
    let token = AccessToken::new(
        args.email.as_str(),
        args.date.as_str(),
        args.time.as_str(),
        args.duration.as_str(),
    );
    token
        .window()
        .context("token describes an invalid access window")?;
    match &args.base_url {
        Some(base_url) => access_link(base_url, &token).context("build access link"),
        None => token.encode().context("encode token"),
    }
}

pub fn run_token_decode(token: &str) -> Result<AccessToken> {
    AccessToken::decode(token).context("decode token")
}

pub fn run_token_status(
    token: &str,
    now: Option<chrono::NaiveDateTime>,
) -> Result<(AccessToken, WindowStatus)> {
    let token = run_token_decode(token)?;
    let window = token.window().context("read access window")?;
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    let status = window.status(now);
    if !status.is_open() {
        warn!(%status, "Access window closed");
    }
    Ok((token, status))
}
