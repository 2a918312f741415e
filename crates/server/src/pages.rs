// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Server-rendered HTML pages.

use maud::{DOCTYPE, Markup, html};
use roster_api::LoggedUser;
use roster_domain::{Series, StudentWithSeries};

/// Wraps page content in the shared document shell.
fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                (content)
            }
        }
    }
}

/// Navigation header shown on every authenticated page.
fn nav(user: &LoggedUser) -> Markup {
    html! {
        header {
            p { "Logged in as " strong { (user.display_name) } "." }
            nav {
                a href="/" { "Menu" }
                " | "
                a href="/serie" { "Series" }
                " | "
                a href="/aluno" { "Students" }
            }
            form action="/logout" method="post" {
                input type="submit" value="Log out";
            }
        }
        hr;
    }
}

/// A bare error page used for failed requests.
pub fn error_page(message: &str) -> Markup {
    page(
        "Roster - Error",
        html! {
            h1 { "Something went wrong" }
            p { (message) }
            p { a href="/" { "Back to the menu" } }
        },
    )
}

/// The login form, with an optional error and an optional message
/// (e.g. the logout goodbye).
pub fn login_page(error: &str, message: &str) -> Markup {
    page(
        "Roster - Login",
        html! {
            h1 { "Roster" }
            @if !message.is_empty() { p { (message) } }
            @if !error.is_empty() { p { em { (error) } } }
            form action="/login" method="post" {
                label { "Login: " input type="text" name="login"; }
                br;
                label { "Password: " input type="password" name="senha"; }
                br;
                input type="submit" value="Log in";
            }
        },
    )
}

/// The main menu, with an optional operation-result message.
pub fn menu_page(user: &LoggedUser, message: &str) -> Markup {
    page(
        "Roster - Menu",
        html! {
            (nav(user))
            h1 { "Menu" }
            @if !message.is_empty() { p { (message) } }
            ul {
                li { a href="/serie" { "List series" } }
                li { a href="/serie/novo" { "New series" } }
                li { a href="/aluno" { "List students" } }
                li { a href="/aluno/novo" { "New student" } }
            }
        },
    )
}

/// The series listing.
pub fn series_list_page(user: &LoggedUser, series: &[Series]) -> Markup {
    page(
        "Roster - Series",
        html! {
            (nav(user))
            h1 { "Series" }
            table border="1" {
                tr { th { "Id" } th { "Number" } th { "Class" } }
                @for s in series {
                    tr {
                        td { (s.series_id) }
                        td { (s.number) }
                        td { (s.letter) }
                    }
                }
            }
            p { a href="/serie/novo" { "New series" } }
        },
    )
}

/// The create-series form.
pub fn series_form_page(user: &LoggedUser) -> Markup {
    page(
        "Roster - New series",
        html! {
            (nav(user))
            h1 { "New series" }
            form action="/serie/novo" method="post" {
                label { "Number: " input type="number" name="numero"; }
                br;
                label { "Class letter: " input type="text" name="turma" maxlength="1"; }
                br;
                input type="submit" value="Create";
            }
        },
    )
}

/// The student listing, with edit links and delete buttons.
pub fn students_list_page(user: &LoggedUser, students: &[StudentWithSeries]) -> Markup {
    page(
        "Roster - Students",
        html! {
            (nav(user))
            h1 { "Students" }
            script {
                (maud::PreEscaped(
                    "function removeStudent(id) {\
                       fetch('/aluno/' + id, {method: 'DELETE'})\
                         .then(() => location.reload());\
                     }"
                ))
            }
            table border="1" {
                tr {
                    th { "Id" } th { "Name" } th { "Sex" } th { "Series" }
                    th { "Photo" } th { "" } th { "" }
                }
                @for entry in students {
                    tr {
                        td { (entry.student.student_id) }
                        td { (entry.student.name) }
                        td { (entry.student.sex) }
                        td { (entry.number) (entry.letter) }
                        td {
                            @if let Some(photo_id) = &entry.student.photo_id {
                                img src={ "/aluno/foto/" (photo_id) } alt="photo" height="48";
                            }
                        }
                        td { a href={ "/aluno/" (entry.student.student_id) } { "Edit" } }
                        td {
                            button onclick={
                                "removeStudent(" (entry.student.student_id) ")"
                            } { "Delete" }
                        }
                    }
                }
            }
            p { a href="/aluno/novo" { "New student" } }
        },
    )
}

/// The student create/edit form.
///
/// For creation `student` is `None` and the form posts to
/// `/aluno/novo`; for editing it is prefilled and posts back to the
/// student's own URL.
pub fn student_form_page(
    user: &LoggedUser,
    student: Option<&StudentWithSeries>,
    series: &[Series],
) -> Markup {
    let action: String = student.map_or_else(
        || String::from("/aluno/novo"),
        |s| format!("/aluno/{}", s.student.student_id),
    );
    let name: &str = student.map_or("", |s| &s.student.name);
    let sex: &str = student.map_or("", |s| s.student.sex.as_str());
    let series_id: Option<i64> = student.map(|s| s.student.series_id);
    page(
        "Roster - Student",
        html! {
            (nav(user))
            h1 { @if student.is_some() { "Edit student" } @else { "New student" } }
            form action=(action) method="post" enctype="multipart/form-data" {
                label { "Name: " input type="text" name="nome" value=(name); }
                br;
                label {
                    "Sex: "
                    select name="sexo" {
                        option value="F" selected[sex == "F"] { "F" }
                        option value="M" selected[sex == "M"] { "M" }
                    }
                }
                br;
                label {
                    "Series: "
                    select name="id_serie" {
                        @for s in series {
                            option value=(s.series_id)
                                selected[series_id == Some(s.series_id)] {
                                (s.label())
                            }
                        }
                    }
                }
                br;
                @if let Some(photo_id) = student.and_then(|s| s.student.photo_id.as_deref()) {
                    img src={ "/aluno/foto/" (photo_id) } alt="photo" height="96";
                    br;
                }
                label { "Photo: " input type="file" name="foto"; }
                br;
                input type="submit" value="Save";
            }
        },
    )
}
