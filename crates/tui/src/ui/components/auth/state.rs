use std::time::{Duration, Instant};

use kotp_types::{Division, Severity};
use ratatui::layout::Rect;

use crate::ui::components::common::TextInputState;
use kotp_util::validation::{MIN_PASSWORD_LEN, looks_like_email};

/// How long a status banner stays on screen before the tick sweeps it away.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    SignIn,
    Register,
    Reset,
}

impl AuthTab {
    pub const ALL: [AuthTab; 3] = [AuthTab::SignIn, AuthTab::Register, AuthTab::Reset];

    pub fn label(self) -> &'static str {
        match self {
            AuthTab::SignIn => "Sign In",
            AuthTab::Register => "Register",
            AuthTab::Reset => "Reset Password",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthTab::SignIn => "Sign In",
            AuthTab::Register => "Create Account",
            AuthTab::Reset => "Send Reset Link",
        }
    }
}

/// One focusable element of the account card. Which slots exist, and in what
/// order, depends on the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSlot {
    TabBar,
    Username,
    Email,
    Password,
    Confirm,
    Division,
    RememberMe,
    Terms,
    Submit,
}

const SIGN_IN_SLOTS: &[AuthSlot] = &[
    AuthSlot::TabBar,
    AuthSlot::Email,
    AuthSlot::Password,
    AuthSlot::RememberMe,
    AuthSlot::Submit,
];

const REGISTER_SLOTS: &[AuthSlot] = &[
    AuthSlot::TabBar,
    AuthSlot::Username,
    AuthSlot::Email,
    AuthSlot::Password,
    AuthSlot::Confirm,
    AuthSlot::Division,
    AuthSlot::Terms,
    AuthSlot::Submit,
];

const RESET_SLOTS: &[AuthSlot] = &[AuthSlot::TabBar, AuthSlot::Email, AuthSlot::Submit];

/// Transient banner under the form. Severity picks the style; `posted` feeds
/// the expiry sweep.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
    posted: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: TextInputState,
    pub password: TextInputState,
    pub remember_me: bool,
    pub show_password: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: TextInputState,
    pub email: TextInputState,
    pub password: TextInputState,
    pub confirm: TextInputState,
    pub division: Option<Division>,
    pub accept_terms: bool,
    pub show_password: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResetForm {
    pub email: TextInputState,
}

/// State for the account screen: three tabs of client-side forms.
///
/// There is deliberately no account service behind any of this. Submission
/// validates locally and then says so; it never pretends a request went out.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    active_tab: AuthTab,
    /// Index into `slots()` for the active tab. Zero is the tab bar.
    focus: usize,
    message: Option<StatusMessage>,

    pub sign_in: SignInForm,
    pub register: RegisterForm,
    pub reset: ResetForm,

    /// Last rendered card area, for mouse hit testing.
    pub last_area: Rect,
    /// Hit rect per slot, indexed like `slots()`.
    pub per_slot_areas: Vec<Rect>,
    /// Hit rect per tab label inside the tab bar.
    pub tab_areas: Vec<Rect>,
}

impl AuthState {
    pub fn active_tab(&self) -> AuthTab {
        self.active_tab
    }

    /// Switches tab and clears any visible banner, stale or not.
    pub fn switch_tab(&mut self, tab: AuthTab) {
        self.active_tab = tab;
        self.focus = 0;
        self.message = None;
    }

    pub fn reduce_cycle_tab(&mut self, forward: bool) {
        let index = AuthTab::ALL
            .iter()
            .position(|t| *t == self.active_tab)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % AuthTab::ALL.len()
        } else {
            (index + AuthTab::ALL.len() - 1) % AuthTab::ALL.len()
        };
        self.switch_tab(AuthTab::ALL[next]);
    }

    // =================
    // Focus ring
    // =================
    pub fn slots(&self) -> &'static [AuthSlot] {
        match self.active_tab {
            AuthTab::SignIn => SIGN_IN_SLOTS,
            AuthTab::Register => REGISTER_SLOTS,
            AuthTab::Reset => RESET_SLOTS,
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_slot(&self) -> AuthSlot {
        self.slots()[self.focus.min(self.slots().len() - 1)]
    }

    pub fn apply_focus(&mut self, index: usize) {
        self.focus = index.min(self.slots().len() - 1);
    }

    /// Advances focus; returns true when it steps past the last slot. The
    /// caller hands keyboard ownership back to the header chrome on wrap-out
    /// and focus parks on the tab bar for the next visit.
    pub fn apply_next_focus(&mut self) -> bool {
        if self.focus + 1 >= self.slots().len() {
            self.focus = 0;
            return true;
        }
        self.focus += 1;
        false
    }

    /// Moves focus backwards; returns true when already at the tab bar.
    pub fn apply_previous_focus(&mut self) -> bool {
        if self.focus == 0 {
            return true;
        }
        self.focus -= 1;
        false
    }

    pub fn reduce_move_focus_down(&mut self) {
        self.focus = (self.focus + 1).min(self.slots().len() - 1);
    }

    pub fn reduce_move_focus_up(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    // =================
    // Field editing
    // =================
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInputState> {
        match (self.active_tab, self.focused_slot()) {
            (AuthTab::SignIn, AuthSlot::Email) => Some(&mut self.sign_in.email),
            (AuthTab::SignIn, AuthSlot::Password) => Some(&mut self.sign_in.password),
            (AuthTab::Register, AuthSlot::Username) => Some(&mut self.register.username),
            (AuthTab::Register, AuthSlot::Email) => Some(&mut self.register.email),
            (AuthTab::Register, AuthSlot::Password) => Some(&mut self.register.password),
            (AuthTab::Register, AuthSlot::Confirm) => Some(&mut self.register.confirm),
            (AuthTab::Reset, AuthSlot::Email) => Some(&mut self.reset.email),
            _ => None,
        }
    }

    /// Toggles the checkbox under focus, if any.
    pub fn reduce_toggle_flag(&mut self) {
        match (self.active_tab, self.focused_slot()) {
            (AuthTab::SignIn, AuthSlot::RememberMe) => {
                self.sign_in.remember_me = !self.sign_in.remember_me;
            }
            (AuthTab::Register, AuthSlot::Terms) => {
                self.register.accept_terms = !self.register.accept_terms;
            }
            _ => {}
        }
    }

    /// Steps the division picker through none and each division, wrapping.
    pub fn reduce_cycle_division(&mut self, forward: bool) {
        let order: Vec<Option<Division>> = std::iter::once(None)
            .chain(Division::ALL.iter().copied().map(Some))
            .collect();
        let index = order
            .iter()
            .position(|d| *d == self.register.division)
            .unwrap_or(0);
        let next = if forward {
            (index + 1) % order.len()
        } else {
            (index + order.len() - 1) % order.len()
        };
        self.register.division = order[next];
    }

    /// Flips masked rendering for the active tab's password fields. Each form
    /// remembers its own setting.
    pub fn reduce_toggle_show_password(&mut self) {
        match self.active_tab {
            AuthTab::SignIn => self.sign_in.show_password = !self.sign_in.show_password,
            AuthTab::Register => self.register.show_password = !self.register.show_password,
            AuthTab::Reset => {}
        }
    }

    pub fn show_password(&self) -> bool {
        match self.active_tab {
            AuthTab::SignIn => self.sign_in.show_password,
            AuthTab::Register => self.register.show_password,
            AuthTab::Reset => false,
        }
    }

    // =================
    // Status banner
    // =================
    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn has_pending_message(&self) -> bool {
        self.message.is_some()
    }

    pub fn post_message<S: Into<String>>(&mut self, severity: Severity, text: S, now: Instant) {
        self.message = Some(StatusMessage {
            severity,
            text: text.into(),
            posted: now,
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Drops the banner once it has been visible a full TTL. Driven by the
    /// runtime tick.
    pub fn expire_stale(&mut self, now: Instant) {
        if let Some(message) = &self.message
            && now.duration_since(message.posted) >= MESSAGE_TTL
        {
            self.message = None;
        }
    }

    // =================
    // Submission
    // =================
    /// Validates the active form and posts the outcome as a banner.
    ///
    /// A valid form does not fake a round trip: there is no account service
    /// here, and the banner says exactly that.
    pub fn submit(&mut self, now: Instant) {
        match self.validate_active() {
            Ok(()) => self.post_message(Severity::Warning, offline_notice(self.active_tab), now),
            Err(text) => self.post_message(Severity::Error, text, now),
        }
    }

    fn validate_active(&self) -> Result<(), String> {
        match self.active_tab {
            AuthTab::SignIn => {
                if !looks_like_email(self.sign_in.email.input().trim()) {
                    return Err("Enter a valid email address".into());
                }
                if self.sign_in.password.is_empty() {
                    return Err("Enter your password".into());
                }
                Ok(())
            }
            AuthTab::Register => {
                let form = &self.register;
                if form.username.is_empty() {
                    return Err("Choose a username".into());
                }
                if !looks_like_email(form.email.input().trim()) {
                    return Err("Enter a valid email address".into());
                }
                if form.password.input().chars().count() < MIN_PASSWORD_LEN {
                    return Err(format!(
                        "Password must be at least {MIN_PASSWORD_LEN} characters"
                    ));
                }
                if form.confirm.input() != form.password.input() {
                    return Err("Passwords do not match!".into());
                }
                if form.division.is_none() {
                    return Err("Choose your division".into());
                }
                if !form.accept_terms {
                    return Err("Please agree to the terms and conditions".into());
                }
                Ok(())
            }
            AuthTab::Reset => {
                if !looks_like_email(self.reset.email.input().trim()) {
                    return Err("Enter a valid email address".into());
                }
                Ok(())
            }
        }
    }
}

fn offline_notice(tab: AuthTab) -> &'static str {
    match tab {
        AuthTab::SignIn => {
            "Details pass local checks, but this fan preview has no sign-in service. Nothing was sent."
        }
        AuthTab::Register => {
            "Registration passes local checks, but this fan preview has no account service. Nothing was sent."
        }
        AuthTab::Reset => {
            "Reset request passes local checks, but this fan preview has no mail service. Nothing was sent."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_register() -> AuthState {
        let mut state = AuthState::default();
        state.switch_tab(AuthTab::Register);
        state.register.username.set_input("rita");
        state.register.email.set_input("rita@example.com");
        state.register.password.set_input("Passw0rd!");
        state.register.confirm.set_input("Passw0rd!");
        state.register.division = Some(Division::Premier);
        state.register.accept_terms = true;
        state
    }

    #[test]
    fn sign_in_rejects_a_malformed_email() {
        let mut state = AuthState::default();
        state.sign_in.email.set_input("not-an-email");
        state.sign_in.password.set_input("hunter2!");

        state.submit(Instant::now());
        let message = state.message().expect("banner posted");
        assert_eq!(message.severity, Severity::Error);
        assert_eq!(message.text, "Enter a valid email address");
    }

    #[test]
    fn sign_in_requires_a_password() {
        let mut state = AuthState::default();
        state.sign_in.email.set_input("rita@example.com");

        state.submit(Instant::now());
        assert_eq!(state.message().expect("banner posted").text, "Enter your password");
    }

    #[test]
    fn register_reports_each_missing_piece_in_order() {
        let mut state = AuthState::default();
        state.switch_tab(AuthTab::Register);
        let now = Instant::now();

        state.submit(now);
        assert_eq!(state.message().expect("banner").text, "Choose a username");

        state.register.username.set_input("rita");
        state.submit(now);
        assert_eq!(state.message().expect("banner").text, "Enter a valid email address");

        state.register.email.set_input("rita@example.com");
        state.register.password.set_input("short");
        state.submit(now);
        assert_eq!(
            state.message().expect("banner").text,
            "Password must be at least 8 characters"
        );

        state.register.password.set_input("Passw0rd!");
        state.register.confirm.set_input("Passw0rd?");
        state.submit(now);
        assert_eq!(state.message().expect("banner").text, "Passwords do not match!");

        state.register.confirm.set_input("Passw0rd!");
        state.submit(now);
        assert_eq!(state.message().expect("banner").text, "Choose your division");

        state.register.division = Some(Division::Sunday);
        state.submit(now);
        assert_eq!(
            state.message().expect("banner").text,
            "Please agree to the terms and conditions"
        );
    }

    #[test]
    fn a_valid_submission_is_honest_about_the_missing_service() {
        let mut state = filled_register();
        state.submit(Instant::now());

        let message = state.message().expect("banner posted");
        assert_eq!(message.severity, Severity::Warning);
        assert!(message.text.contains("Nothing was sent"));
        assert!(!message.text.to_lowercase().contains("successful"));
    }

    #[test]
    fn reset_needs_only_an_email() {
        let mut state = AuthState::default();
        state.switch_tab(AuthTab::Reset);
        state.reset.email.set_input("rita@example.com");

        state.submit(Instant::now());
        assert_eq!(
            state.message().expect("banner posted").severity,
            Severity::Warning
        );
    }

    #[test]
    fn banners_expire_after_the_ttl() {
        let mut state = AuthState::default();
        let posted = Instant::now();
        state.post_message(Severity::Info, "hello", posted);

        state.expire_stale(posted + Duration::from_secs(4));
        assert!(state.has_pending_message());

        state.expire_stale(posted + MESSAGE_TTL);
        assert!(!state.has_pending_message());
    }

    #[test]
    fn switching_tabs_clears_the_banner() {
        let mut state = AuthState::default();
        state.post_message(Severity::Error, "bad input", Instant::now());

        state.switch_tab(AuthTab::Reset);
        assert!(state.message().is_none());
        assert_eq!(state.active_tab(), AuthTab::Reset);
    }

    #[test]
    fn tab_cycle_wraps_both_directions() {
        let mut state = AuthState::default();
        state.reduce_cycle_tab(false);
        assert_eq!(state.active_tab(), AuthTab::Reset);
        state.reduce_cycle_tab(true);
        assert_eq!(state.active_tab(), AuthTab::SignIn);
    }

    #[test]
    fn focus_rings_through_the_form_and_wraps_out() {
        let mut state = AuthState::default();
        assert_eq!(state.focused_slot(), AuthSlot::TabBar);

        let mut wrapped = false;
        for _ in 0..SIGN_IN_SLOTS.len() {
            wrapped = state.apply_next_focus();
        }
        assert!(wrapped);
        assert_eq!(state.focused_slot(), AuthSlot::TabBar);

        assert!(state.apply_previous_focus());
    }

    #[test]
    fn division_picker_cycles_through_none() {
        let mut state = AuthState::default();
        state.switch_tab(AuthTab::Register);
        assert_eq!(state.register.division, None);

        state.reduce_cycle_division(true);
        assert_eq!(state.register.division, Some(Division::Premier));
        state.reduce_cycle_division(false);
        assert_eq!(state.register.division, None);
        state.reduce_cycle_division(false);
        assert_eq!(state.register.division, Some(Division::Sunday));
    }

    #[test]
    fn each_form_remembers_its_own_visibility_toggle() {
        let mut state = AuthState::default();
        state.reduce_toggle_show_password();
        assert!(state.show_password());

        state.switch_tab(AuthTab::Register);
        assert!(!state.show_password());
        state.reduce_toggle_show_password();
        assert!(state.show_password());

        state.switch_tab(AuthTab::SignIn);
        assert!(state.show_password());
    }

    #[test]
    fn focused_input_follows_the_active_tab() {
        let mut state = AuthState::default();
        state.apply_focus(1);
        state
            .focused_input_mut()
            .expect("email field focused")
            .set_input("rita@example.com");
        assert_eq!(state.sign_in.email.input(), "rita@example.com");

        state.switch_tab(AuthTab::Reset);
        state.apply_focus(1);
        state
            .focused_input_mut()
            .expect("reset email focused")
            .set_input("other@example.com");
        assert_eq!(state.reset.email.input(), "other@example.com");
    }
}
