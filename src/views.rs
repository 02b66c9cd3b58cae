//! HTML pages
//!
//! Small inline documents. Anything that came from outside the process is
//! escaped before it is interpolated.

use html_escape::encode_text;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title} - Gatehouse</title></head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Home page for visitors without a valid session
pub fn home_guest() -> String {
    page(
        "Home",
        r#"<h1>Welcome</h1>
<p>You are not logged in.</p>
<p><a href="/login">Log in</a> or <a href="/signup">sign up</a>.</p>"#,
    )
}

/// Home page for a verified session
pub fn home_user(username: &str) -> String {
    page(
        "Home",
        &format!(
            r#"<h1>Welcome, {}</h1>
<p>You are logged in.</p>
<p><a href="/logout">Log out</a></p>"#,
            encode_text(username)
        ),
    )
}

pub fn login_form() -> String {
    page(
        "Log in",
        r#"<h1>Log in</h1>
<form method="post" action="/login">
  <label>Username or email <input type="text" name="username_or_email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
</form>
<p>No account? <a href="/signup">Sign up</a></p>"#,
    )
}

pub fn signup_form() -> String {
    page(
        "Sign up",
        r#"<h1>Sign up</h1>
<form method="post" action="/signup">
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password" required></label>
  <label>Email <input type="email" name="email"></label>
  <button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
    )
}
