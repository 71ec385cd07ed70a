//! User-visible reply texts.

pub const FAILED_GETTING_DATA: &str = "I'm having trouble getting your data, please try again in a moment.";
pub const CHECK_MEMOBIRD_ID: &str = "Please check the Memobird ID provided.";
pub const BIND_HELP: &str =
    "Please use /bind [YourMemobirdID] to bind a Memobird before sending anything for printing";
pub const FAILED_SENDING_VERIFICATION: &str = "I'm having trouble sending you a verification code, please check the Memobird ID provided or try again in a moment.";
pub const VERIFICATION_SENT: &str =
    "A verification code with instructions was sent to your device, please follow it to complete the binding.";
pub const BIND_COMPLETE: &str = "Device binding complete!";
pub const VERIFICATION_FAILED: &str = "Verification failed, please check the code or try again in a moment.";
pub const SENT_FAILURE: &str = "The message failed to deliver";

pub fn nice_to_meet_you(name: &str) -> String {
    format!("Hello {}, nice to meet you!", name)
}

pub fn failed_sending_message(err: &dyn std::fmt::Display) -> String {
    format!("Error sending your message: {}", err)
}

pub fn sent(accepted: bool, printed: bool) -> String {
    format!("- Sent: {}\n- Printed: {}", accepted, printed)
}

pub fn unencodable(character: char) -> String {
    format!(
        "Sorry, this message contains a character the Memobird cannot print: '{}'",
        character
    )
}
