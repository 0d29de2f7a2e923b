use super::forms::{self, FieldErrors};
use super::PageEnv;
use crate::api::auth::{
    self, EmailRequest, LoginRequest, LoginResponse, OtpRequest, RegisterRequest,
    ResetPasswordRequest,
};
use crate::api::StatusMessage;
use crate::task::Task;
use eframe::egui;
use std::sync::Arc;
use std::time::{Duration, Instant};

const RESEND_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScreen {
    Login,
    Signup,
    VerifyEmail,
    ForgotPassword,
    ResetPassword,
}

enum AuthAction {
    Login,
    Register,
    VerifyEmail,
    Resend,
    Forgot,
    Reset,
}

enum AuthOutcome {
    LoggedIn(LoginResponse),
    Status(StatusMessage),
}

/// The public auth screens: login, signup, email verification, password
/// reset. Emits the session token once login succeeds; until then the rest
/// of the application stays unreachable.
pub struct AuthFlow {
    pub screen: AuthScreen,
    full_name: String,
    email: String,
    password: String,
    confirm_password: String,
    show_password: bool,
    otp: String,
    new_password: String,
    errors: FieldErrors,
    resend_started: Option<Instant>,
    pending: Option<(AuthAction, Task<AuthOutcome>)>,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self {
            screen: AuthScreen::Login,
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            show_password: false,
            otp: String::new(),
            new_password: String::new(),
            errors: FieldErrors::default(),
            resend_started: None,
            pending: None,
        }
    }
}

impl AuthFlow {
    /// Render the active auth screen; returns the token when a login
    /// completed this frame.
    pub fn ui(&mut self, ctx: &egui::Context, env: &mut PageEnv<'_>) -> Option<String> {
        let token = self.poll_pending(env);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("eventdeck");
                ui.add_space(4.0);
                ui.weak(match self.screen {
                    AuthScreen::Login => "Sign in to the admin console",
                    AuthScreen::Signup => "Create an account",
                    AuthScreen::VerifyEmail => "Verify your email",
                    AuthScreen::ForgotPassword => "Reset your password",
                    AuthScreen::ResetPassword => "Choose a new password",
                });
                ui.add_space(16.0);
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_max_width(360.0);
                    match self.screen {
                        AuthScreen::Login => self.login_form(ui, env),
                        AuthScreen::Signup => self.signup_form(ui, env),
                        AuthScreen::VerifyEmail => self.otp_form(ui, env, false),
                        AuthScreen::ForgotPassword => self.forgot_form(ui, env),
                        AuthScreen::ResetPassword => self.otp_form(ui, env, true),
                    }
                });
            });
        });

        if self.resend_started.is_some() {
            // Keep the countdown label ticking.
            ctx.request_repaint_after(Duration::from_secs(1));
        }
        token
    }

    fn busy(&self) -> bool {
        self.pending.is_some()
    }

    fn switch(&mut self, screen: AuthScreen) {
        self.screen = screen;
        self.errors.clear();
        self.otp.clear();
    }

    fn login_form(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>) {
        self.email_field(ui);
        self.password_field(ui, "Password");

        ui.add_space(8.0);
        if ui
            .add_enabled(!self.busy(), egui::Button::new("Sign in"))
            .clicked()
        {
            self.errors.clear();
            if self.email.trim().is_empty() {
                self.errors.set("email", "Email is required");
            } else if !forms::valid_email(&self.email) {
                self.errors.set("email", "Enter a valid email address");
            }
            if self.password.is_empty() {
                self.errors.set("password", "Password is required");
            }
            if self.errors.is_empty() {
                let api = Arc::clone(env.api);
                let request = LoginRequest {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                self.pending = Some((
                    AuthAction::Login,
                    Task::spawn(ui.ctx(), move || {
                        Ok(AuthOutcome::LoggedIn(auth::login(&api, &request)?))
                    }),
                ));
            }
        }
        if self.busy() {
            ui.spinner();
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.link("Forgot password?").clicked() {
                self.switch(AuthScreen::ForgotPassword);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.link("Create an account").clicked() {
                    self.switch(AuthScreen::Signup);
                }
            });
        });
    }

    fn signup_form(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>) {
        ui.label("Full name");
        ui.text_edit_singleline(&mut self.full_name);
        forms::field_error(ui, &self.errors, "full_name");

        self.email_field(ui);
        self.password_field(ui, "Password");

        ui.label("Confirm password");
        ui.add(egui::TextEdit::singleline(&mut self.confirm_password).password(!self.show_password));
        forms::field_error(ui, &self.errors, "confirm_password");

        ui.add_space(8.0);
        if ui
            .add_enabled(!self.busy(), egui::Button::new("Sign up"))
            .clicked()
        {
            self.errors.clear();
            if self.full_name.trim().is_empty() {
                self.errors.set("full_name", "Full name is required");
            }
            if self.email.trim().is_empty() {
                self.errors.set("email", "Email is required");
            } else if !forms::valid_email(&self.email) {
                self.errors.set("email", "Enter a valid email address");
            }
            if !forms::valid_password(&self.password) {
                self.errors.set(
                    "password",
                    "Password needs at least 8 characters with a letter and a digit",
                );
            }
            if self.confirm_password != self.password {
                self.errors.set("confirm_password", "Passwords do not match");
            }
            if self.errors.is_empty() {
                let api = Arc::clone(env.api);
                let request = RegisterRequest {
                    full_name: self.full_name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                self.pending = Some((
                    AuthAction::Register,
                    Task::spawn(ui.ctx(), move || {
                        Ok(AuthOutcome::Status(auth::register(&api, &request)?))
                    }),
                ));
            }
        }
        if self.busy() {
            ui.spinner();
        }

        ui.add_space(8.0);
        if ui.link("Already have an account? Sign in").clicked() {
            self.switch(AuthScreen::Login);
        }
    }

    fn forgot_form(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>) {
        ui.label("We will send a one-time code to your email.");
        self.email_field(ui);

        ui.add_space(8.0);
        if ui
            .add_enabled(!self.busy(), egui::Button::new("Send code"))
            .clicked()
        {
            self.errors.clear();
            if !forms::valid_email(&self.email) {
                self.errors.set("email", "Enter a valid email address");
            }
            if self.errors.is_empty() {
                let api = Arc::clone(env.api);
                let request = EmailRequest {
                    email: self.email.trim().to_string(),
                };
                self.pending = Some((
                    AuthAction::Forgot,
                    Task::spawn(ui.ctx(), move || {
                        Ok(AuthOutcome::Status(auth::forget_password(&api, &request)?))
                    }),
                ));
            }
        }
        if self.busy() {
            ui.spinner();
        }

        ui.add_space(8.0);
        if ui.link("Back to sign in").clicked() {
            self.switch(AuthScreen::Login);
        }
    }

    /// OTP entry, shared by email verification and password reset; the reset
    /// variant also asks for the new password.
    fn otp_form(&mut self, ui: &mut egui::Ui, env: &mut PageEnv<'_>, reset: bool) {
        ui.label(format!("Enter the code sent to {}", self.email.trim()));
        ui.add(egui::TextEdit::singleline(&mut self.otp).hint_text("6-digit code"));
        forms::field_error(ui, &self.errors, "otp");

        if reset {
            ui.label("New password");
            ui.add(egui::TextEdit::singleline(&mut self.new_password).password(true));
            forms::field_error(ui, &self.errors, "new_password");
        }

        ui.add_space(8.0);
        let cta = if reset { "Reset password" } else { "Verify" };
        if ui.add_enabled(!self.busy(), egui::Button::new(cta)).clicked() {
            self.errors.clear();
            if self.otp.trim().len() != 6 || !self.otp.trim().chars().all(|c| c.is_ascii_digit()) {
                self.errors.set("otp", "Enter the 6-digit code");
            }
            if reset && !forms::valid_password(&self.new_password) {
                self.errors.set(
                    "new_password",
                    "Password needs at least 8 characters with a letter and a digit",
                );
            }
            if self.errors.is_empty() {
                let api = Arc::clone(env.api);
                if reset {
                    let request = ResetPasswordRequest {
                        email: self.email.trim().to_string(),
                        otp: self.otp.trim().to_string(),
                        new_password: self.new_password.clone(),
                    };
                    self.pending = Some((
                        AuthAction::Reset,
                        Task::spawn(ui.ctx(), move || {
                            Ok(AuthOutcome::Status(auth::verify_forget_password(
                                &api, &request,
                            )?))
                        }),
                    ));
                } else {
                    let request = OtpRequest {
                        email: self.email.trim().to_string(),
                        otp: self.otp.trim().to_string(),
                    };
                    self.pending = Some((
                        AuthAction::VerifyEmail,
                        Task::spawn(ui.ctx(), move || {
                            Ok(AuthOutcome::Status(auth::verify_email(&api, &request)?))
                        }),
                    ));
                }
            }
        }
        if self.busy() {
            ui.spinner();
        }

        ui.add_space(8.0);
        let remaining = self.resend_remaining();
        ui.horizontal(|ui| {
            if remaining > 0 {
                ui.weak(format!("Resend available in {remaining}s"));
            } else if ui
                .add_enabled(!self.busy(), egui::Button::new("Resend code"))
                .clicked()
            {
                let api = Arc::clone(env.api);
                let request = EmailRequest {
                    email: self.email.trim().to_string(),
                };
                let resend_for_reset = reset;
                self.pending = Some((
                    AuthAction::Resend,
                    Task::spawn(ui.ctx(), move || {
                        let status = if resend_for_reset {
                            auth::forget_password(&api, &request)?
                        } else {
                            auth::resend_email(&api, &request)?
                        };
                        Ok(AuthOutcome::Status(status))
                    }),
                ));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.link("Back to sign in").clicked() {
                    self.switch(AuthScreen::Login);
                }
            });
        });
    }

    fn email_field(&mut self, ui: &mut egui::Ui) {
        ui.label("Email");
        ui.text_edit_singleline(&mut self.email);
        forms::field_error(ui, &self.errors, "email");
    }

    fn password_field(&mut self, ui: &mut egui::Ui, label: &str) {
        ui.label(label);
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.password).password(!self.show_password));
            let eye = if self.show_password { "🙈" } else { "👁" };
            if ui.small_button(eye).clicked() {
                self.show_password = !self.show_password;
            }
        });
        forms::field_error(ui, &self.errors, "password");
    }

    fn resend_remaining(&self) -> u64 {
        match self.resend_started {
            Some(started) => RESEND_SECS.saturating_sub(started.elapsed().as_secs()),
            None => 0,
        }
    }

    fn poll_pending(&mut self, env: &mut PageEnv<'_>) -> Option<String> {
        let (action, mut task) = self.pending.take()?;
        let outcome = match task.poll() {
            Some(outcome) => outcome,
            None => {
                self.pending = Some((action, task));
                return None;
            }
        };

        match (action, outcome) {
            (AuthAction::Login, Ok(AuthOutcome::LoggedIn(response))) => {
                env.toast_success(
                    response
                        .message
                        .clone()
                        .unwrap_or_else(|| "Signed in".into()),
                );
                self.password.clear();
                return Some(response.token);
            }
            (AuthAction::Register, Ok(AuthOutcome::Status(status))) => {
                env.toast_success(status.message_or("Account created, check your email"));
                self.resend_started = Some(Instant::now());
                self.switch(AuthScreen::VerifyEmail);
            }
            (AuthAction::VerifyEmail, Ok(AuthOutcome::Status(status))) => {
                env.toast_success(status.message_or("Email verified, you can sign in now"));
                self.resend_started = None;
                self.switch(AuthScreen::Login);
            }
            (AuthAction::Resend, Ok(AuthOutcome::Status(status))) => {
                env.toast_success(status.message_or("Code sent"));
                self.resend_started = Some(Instant::now());
            }
            (AuthAction::Forgot, Ok(AuthOutcome::Status(status))) => {
                env.toast_success(status.message_or("Code sent to your email"));
                self.resend_started = Some(Instant::now());
                self.switch(AuthScreen::ResetPassword);
            }
            (AuthAction::Reset, Ok(AuthOutcome::Status(status))) => {
                env.toast_success(status.message_or("Password updated, sign in"));
                self.resend_started = None;
                self.new_password.clear();
                self.switch(AuthScreen::Login);
            }
            (_, Err(err)) => {
                // Entered values stay put so the user can correct and retry.
                env.toast_error(err.to_string());
            }
            (_, Ok(_)) => {
                tracing::warn!("auth action resolved with an unexpected outcome");
            }
        }
        None
    }
}
