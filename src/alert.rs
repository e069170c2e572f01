use chrono::NaiveDateTime;
use log::info;
use crate::config::AlertParameters;
use crate::manager_mail::Mail;
use crate::manager_mail::errors::MailError;
use crate::models::forecast::ForecastSummary;

/// Formats the alert mail for the given summary and hands it to the mail
/// manager. Delivery errors propagate to the caller, which retries the
/// whole send.
///
/// # Arguments
///
/// * 'mail' - the mail manager to send through
/// * 'summary' - the forecast summary to report
/// * 'alert' - threshold and testing mode parameters
pub fn send_rain_alert(mail: &Mail, summary: &ForecastSummary, alert: &AlertParameters) -> Result<(), MailError> {
    info!("Preparing to send rain alert email");

    let (subject, body) = compose_alert(summary, alert);

    mail.send_mail(subject, body)
}

/// Builds the subject and body for an alert mail.
///
/// When testing mode is on and the maximum probability is below the
/// threshold the mail is marked as a test notification rather than a
/// genuine alert.
///
/// # Arguments
///
/// * 'summary' - the forecast summary to report
/// * 'alert' - threshold and testing mode parameters
pub fn compose_alert(summary: &ForecastSummary, alert: &AlertParameters) -> (String, String) {
    let is_test = alert.testing_mode && summary.max_probability < alert.threshold;

    let (subject, reason) = if is_test {
        (
            format!("[TEST] Rain Monitor for {} - {}% Probability", summary.city, summary.max_probability),
            "This is a TEST EMAIL to verify email delivery is working.".to_string(),
        )
    } else {
        (
            format!("Rain Alert for {} - {}% Probability", summary.city, summary.max_probability),
            format!(
                "This alert was triggered because rain probability is {}% or greater within the next 3 hours.",
                alert.threshold
            ),
        )
    };

    let mut body = format!(
        "Rain {} - {}\nCheck Time: {}\n\nRAIN PROBABILITY FORECAST (Next 3 Hours):\n",
        if is_test { "Monitor Test" } else { "Alert" },
        summary.city,
        summary.check_time,
    );

    for (i, hour) in summary.hours.iter().enumerate() {
        body.push_str(&format!(
            "Hour {} ({}): {}% chance, {}mm\n",
            i + 1,
            format_hour(&hour.time),
            hour.probability,
            hour.precipitation,
        ));
    }

    body.push_str(&format!(
        "\nSUMMARY:\n\
         - Maximum Probability: {}%\n\
         - Total Expected Precipitation: {}mm\n\
         - Alert Threshold: {}%\n\
         - Testing Mode: {}\n\n{}\n",
        summary.max_probability,
        summary.total_precipitation,
        alert.threshold,
        if alert.testing_mode { "ON" } else { "OFF" },
        reason,
    ));

    (subject, body)
}

/// Renders a series timestamp as a 12 hour clock time, timestamps that do
/// not parse pass through verbatim
fn format_hour(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}
