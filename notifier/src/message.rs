//! Telegram-HTML formatting of check-in notifications.

use chrono_tz::Tz;
use shared::Guest;

use crate::config::Config;
use crate::filter::parse_checkin_timestamp;

/// Build the notification text for one freshly checked-in guest.
///
/// Interpolated upstream values are HTML-escaped; the upstream has no say
/// over our markup.
pub fn format_checkin(guest: &Guest, event_name: &str, config: &Config) -> String {
    let name = non_empty(&guest.name, "Unknown");
    let email = non_empty(&guest.email, "unknown");
    let ticket_type = guest.ticket_type.as_deref().unwrap_or("General");

    let checked_in_display = guest
        .checked_in_at()
        .map(|raw| localize_timestamp(raw, config.display_timezone))
        .unwrap_or_default();

    let is_vip = config.vip_guests.iter().any(|vip| vip == &guest.name);
    let vip_marker = if is_vip { "🌟 VIP " } else { "" };

    let mut message = format!(
        "🎫 <b>{vip_marker}New check-in</b>\n\n\
         📅 <b>Event:</b> {}\n\
         👤 <b>Name:</b> {}\n\
         📧 <b>Email:</b> {}\n\
         🏷️ <b>Ticket:</b> {}\n\
         ⏰ <b>Checked in:</b> {}",
        escape_html(event_name),
        escape_html(name),
        escape_html(email),
        escape_html(ticket_type),
        checked_in_display,
    );

    if !guest.registration_answers.is_empty() {
        message.push_str("\n\n📝 <b>Registration:</b>");
        for answer in &guest.registration_answers {
            message.push_str(&format!(
                "\n• <b>{}:</b> {}",
                escape_html(&answer.label),
                escape_html(&answer.answer)
            ));
        }
    }

    if is_vip && !config.mention_users.is_empty() {
        message.push_str(&format!(
            "\n\n🚨 <b>VIP guest checked in!</b> {}",
            config.mention_users.join(" ")
        ));
    }

    message
}

/// Render the check-in instant in the configured display zone.
/// Falls back to the raw upstream string when it does not parse.
fn localize_timestamp(raw: &str, zone: Tz) -> String {
    match parse_checkin_timestamp(raw) {
        Ok(instant) => instant
            .with_timezone(&zone)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
