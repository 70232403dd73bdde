mod app;
mod events;
mod ui;

use anyhow::Result;
use app::{App, Options};
use clap::{App as ClapApp, Arg, ArgMatches};
use roundup_classhelper::config::Config;

/// Parse the command line, load the configuration and run the popup.
///
#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("tracker")
                .long("tracker")
                .value_name("URL")
                .help("Tracker url, overrides the configured one")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("helpurl")
                .long("helpurl")
                .value_name("HELPURL")
                .help("Help url of the wrapped link, e.g. user?@template=help&property=nosy")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("PX")
                .default_value("600")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .value_name("PX")
                .default_value("500")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("form")
                .long("form")
                .value_name("NAME")
                .help("Name of the opener form")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("property")
                .long("property")
                .value_name("FIELD")
                .help("Opener field receiving the selection")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("value")
                .long("value")
                .value_name("VALUE")
                .help("Current value of the opener field")
                .default_value("")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("search-with")
                .long("search-with")
                .value_name("FIELDS")
                .help("Search fields, e.g. username,roles[]+username")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("title")
                .long("title")
                .value_name("TEMPLATE")
                .help("Popup title, may contain {className} and {itemDesignator}")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("item")
                .long("item")
                .value_name("DESIGNATOR")
                .help("Designator of the edited item, e.g. issue12")
                .default_value("")
                .takes_value(true),
        )
        .get_matches();

    let options = options_from(&matches);
    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(tracker_url) = &options.tracker_url {
        config.tracker_url = Some(tracker_url.clone());
    }
    App::start(options, config).await
}

fn options_from(matches: &ArgMatches) -> Options {
    let value = |name: &str| matches.value_of(name).map(str::to_string);
    Options {
        tracker_url: value("tracker"),
        helpurl: value("helpurl").unwrap_or_default(),
        width: value("width").unwrap_or_default(),
        height: value("height").unwrap_or_default(),
        form: value("form"),
        property: value("property"),
        value: value("value").unwrap_or_default(),
        search_with: value("search-with"),
        title: value("title"),
        item: value("item").unwrap_or_default(),
    }
}
