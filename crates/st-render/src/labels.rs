//! Localized UI strings.

use st_post::SiteLocale;

/// Fixed interface text of a post page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub loading: &'static str,
    pub edited_on: &'static str,
    pub at: &'static str,
    pub reading_time_unit: &'static str,
    pub previous_post: &'static str,
    pub next_post: &'static str,
    pub exit_preview: &'static str,
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
    pub back_home: &'static str,
}

const EN_US: Labels = Labels {
    loading: "Loading...",
    edited_on: "edited on",
    at: "at",
    reading_time_unit: "min",
    previous_post: "Previous post",
    next_post: "Next post",
    exit_preview: "Exit preview mode",
    not_found_title: "Post not found",
    not_found_body: "There is no post at",
    back_home: "Back to home",
};

const PT_BR: Labels = Labels {
    loading: "Carregando...",
    edited_on: "editado em",
    at: "às",
    reading_time_unit: "min",
    previous_post: "Post anterior",
    next_post: "Próximo post",
    exit_preview: "Sair do modo Preview",
    not_found_title: "Post não encontrado",
    not_found_body: "Não existe post em",
    back_home: "Voltar para o início",
};

impl Labels {
    #[must_use]
    pub fn for_locale(locale: SiteLocale) -> &'static Self {
        match locale {
            SiteLocale::EnUs => &EN_US,
            SiteLocale::PtBr => &PT_BR,
        }
    }
}
