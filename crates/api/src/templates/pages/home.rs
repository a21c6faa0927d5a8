use maud::{html, Markup};

use crate::db::DatasetBounds;
use crate::templates::layouts::{base, PageConfig};

pub fn home_page(bounds: &DatasetBounds) -> Markup {
    let config = PageConfig {
        title: "Hawaii Climate API",
    };

    base(&config, content(bounds))
}

fn content(bounds: &DatasetBounds) -> Markup {
    html! {
        nav class="level mb-4" {
            div class="level-left" {
                h1 class="title level-item" { "Hawaii Climate API" }
            }
            div class="level-right" {
                p class="level-item" {
                    a href="/docs" class="button is-link is-light is-small" {
                        "API Docs"
                    }
                }
            }
        }

        p class="subtitle" {
            "Daily precipitation and temperature observations recorded between "
            strong { (bounds.first) }
            " and "
            strong { (bounds.last) }
            "."
        }

        h2 class="title is-4" { "Routes" }
        div class="content" {
            ul {
                li {
                    "Precipitation: "
                    code { "/api/v1.0/precipitation" }
                }
                li {
                    "Stations: "
                    code { "/api/v1.0/stations" }
                }
                li {
                    "Temperature Observations: "
                    code { "/api/v1.0/tobs" }
                }
                li {
                    "Calculated Temperatures (Single Date): "
                    code { "/api/v1.0/{start}" }
                }
                li {
                    "Calculated Temperatures (Dual Dates): "
                    code { "/api/v1.0/{start}/{end}" }
                }
            }
            p {
                "The calculated temperature routes return the minimum, maximum and average "
                "temperatures over a date range. Given a single date, the range runs from that "
                "date through the end of the dataset. Given two dates, both ends are inclusive. "
                "Replace "
                code { "{start}" }
                " and "
                code { "{end}" }
                " with dates in "
                code { "YYYY-MM-DD" }
                " format."
            }
        }
    }
}
