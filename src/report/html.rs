//! Standalone HTML dashboard.
//!
//! Layout: metric panel beside the listing table, then two bar charts
//! (listings per seller, discount per seller) and the seller share pie.

use crate::analyzer::seller_analysis::discount_totals_by_seller;
use crate::model::{ProductRecord, Statistics};
use crate::pipeline::QueryView;
use crate::report::{ReportOptions, NO_RESULTS_MESSAGE, PROMPT_MESSAGE};
use crate::utils::{escape_html, format_currency};

const PALETTE: [&str; 8] = [
    "#FF4B4B", "#1C83E1", "#FFA421", "#21C354", "#803DF5", "#00C0F2", "#FF8C8C", "#6D3FC0",
];

const STYLES: &str = r#"
        :root { --accent: #FF4B4B; --border: #e6e6e6; --muted: #6b6b6b; }
        body { font-family: system-ui, sans-serif; margin: 24px; color: #262730; }
        h1 { border-bottom: 3px solid var(--accent); padding-bottom: 6px; }
        .grid { display: grid; grid-template-columns: 7fr 1.4fr; gap: 16px; }
        .grid3 { display: grid; grid-template-columns: 3.5fr 3.5fr 1.4fr; gap: 16px; margin-top: 16px; }
        .card { border: 1px solid var(--border); border-radius: 8px; padding: 12px; overflow: auto; }
        .metric { border: 1px solid var(--border); border-radius: 6px; padding: 8px; margin-bottom: 8px; }
        .metric .label { color: var(--muted); font-style: italic; }
        .delta.up { color: #21C354; } .delta.down { color: #FF4B4B; }
        table { border-collapse: collapse; width: 100%; font-size: 14px; }
        th, td { border-bottom: 1px solid var(--border); padding: 4px 8px; text-align: left; }
        td img { height: 48px; }
        progress { width: 90px; accent-color: var(--accent); }
        .bar-row { display: grid; grid-template-columns: 140px 1fr 90px; align-items: center; gap: 8px; margin: 4px 0; }
        .bar { background: var(--accent); height: 10px; border-radius: 2px; }
        .pie { width: 220px; height: 220px; border-radius: 50%; margin: 12px auto; }
        .legend span { display: inline-block; width: 10px; height: 10px; margin-right: 4px; }
        .notice { color: var(--muted); font-size: 18px; }
"#;

pub fn render(view: &QueryView, opts: &ReportOptions) -> String {
    let (title, body) = match view {
        QueryView::Prompt => (
            "DashML".to_string(),
            format!(r#"<p class="notice"><em>{}</em></p>"#, PROMPT_MESSAGE),
        ),
        QueryView::Failed { query, message } => (
            escape_html(query),
            format!(r#"<p class="notice">❌ {}</p>"#, escape_html(message)),
        ),
        QueryView::NoResults { query } => (
            escape_html(query),
            format!("<h1>{}</h1>", NO_RESULTS_MESSAGE),
        ),
        QueryView::Dashboard { query, stats } => (escape_html(query), render_dashboard(query, stats, opts)),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>DashML | {title}</title>
    <style>
{css}
    </style>
</head>
<body>
{body}
    <footer class="notice"><small>Generated {ts}</small></footer>
</body>
</html>"#,
        title = title,
        css = STYLES,
        body = body,
        ts = opts.timestamp()
    )
}

fn render_dashboard(query: &str, stats: &Statistics, opts: &ReportOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h1>Data related to {}</h1>", escape_html(query)));
    out.push_str(r#"<div class="grid">"#);
    out.push_str(&format!(r#"<div class="card">{}</div>"#, listing_table(stats, opts)));
    out.push_str(&format!(r#"<div class="card">{}</div>"#, values_panel(stats, opts)));
    out.push_str("</div>");

    out.push_str(r#"<div class="grid3">"#);
    out.push_str(&format!(
        r#"<div class="card"><p>Product listings per seller</p>{}</div>"#,
        bar_chart(
            stats
                .seller_tally
                .shares
                .iter()
                .map(|s| (s.seller_name.clone(), s.count as f64, s.count.to_string())),
        )
    ));
    out.push_str(&format!(
        r#"<div class="card"><p>Discount per seller</p>{}</div>"#,
        bar_chart(
            discount_totals_by_seller(&stats.discounts)
                .into_iter()
                .map(|(seller, amount)| (seller, amount, format_currency(amount, &opts.currency_symbol))),
        )
    ));
    out.push_str(&format!(r#"<div class="card">{}</div>"#, sellers_panel(stats)));
    out.push_str("</div>");
    out
}

fn listing_table(stats: &Statistics, opts: &ReportOptions) -> String {
    let mut out = String::from(
        "<table>\n<tr><th>Image</th><th>Name</th><th>Seller</th><th>Price</th>\
         <th>Discount %</th><th>Available quantity</th><th>Link</th></tr>\n",
    );
    let max_qty = stats.max_available_quantity.max(1);
    for listing in &stats.listings {
        let r = &listing.record;
        out.push_str(&format!(
            r#"<tr><td><img src="{img}" alt=""></td><td>{name}</td><td>{seller}</td><td>{price}</td><td><progress max="100" value="{pct}"></progress> {pct}%</td><td><progress max="{max_qty}" value="{qty}"></progress> {qty}</td><td><a href="{link}" target="_blank">{link}</a></td></tr>"#,
            img = escape_html(&r.thumbnail_url),
            name = escape_html(&r.name),
            seller = escape_html(&r.seller_name),
            price = format_currency(r.price, &opts.currency_symbol),
            pct = listing.discount_pct,
            max_qty = max_qty,
            qty = r.available_quantity,
            link = escape_html(&r.permalink),
        ));
    }
    out.push_str("</table>");
    out
}

fn extreme_metric(label: &str, record: &ProductRecord, opts: &ReportOptions) -> String {
    format!(
        r#"<div class="metric"><div class="label">{}</div><div>{}</div><img src="{}" alt="" width="200"></div>"#,
        label,
        format_currency(record.price, &opts.currency_symbol),
        escape_html(&record.thumbnail_url)
    )
}

fn values_panel(stats: &Statistics, opts: &ReportOptions) -> String {
    format!(
        r#"<h3><em>Values</em></h3>
<div class="metric"><div class="label">Mean product price:</div><div>{mean}</div></div>
{high}
{low}"#,
        mean = format_currency(stats.mean_price, &opts.currency_symbol),
        high = extreme_metric("Highest priced product", &stats.most_expensive, opts),
        low = extreme_metric("Lowest priced product", &stats.least_expensive, opts),
    )
}

fn delta_class(deviation: i64) -> &'static str {
    if deviation >= 0 { "up" } else { "down" }
}

fn sellers_panel(stats: &Statistics) -> String {
    let top = &stats.top_seller;
    let bottom = &stats.bottom_seller;
    format!(
        r#"<h3><em>Products/Sellers</em></h3>
<div class="metric">Listings shown: {total}</div>
<div class="metric"><div class="label">Most listed seller:</div><div>{top_name}</div><div>{top_count} Products <span class="delta {top_cls}">{top_dev:+}%</span></div></div>
<div class="metric"><div class="label">Least listed seller:</div><div>{bottom_name}</div><div>{bottom_count} Products <span class="delta {bottom_cls}">{bottom_dev:+}%</span></div></div>
<p>Seller distribution (%)</p>
{pie}"#,
        total = stats.total_listings(),
        top_name = escape_html(&top.seller_name),
        top_count = top.count,
        top_cls = delta_class(top.deviation_pct),
        top_dev = top.deviation_pct,
        bottom_name = escape_html(&bottom.seller_name),
        bottom_count = bottom.count,
        bottom_cls = delta_class(bottom.deviation_pct),
        bottom_dev = bottom.deviation_pct,
        pie = pie_chart(stats),
    )
}

/// Horizontal bars, one per `(label, value, caption)`, scaled to the largest value.
fn bar_chart<I>(rows: I) -> String
where
    I: IntoIterator<Item = (String, f64, String)>,
{
    let rows: Vec<_> = rows.into_iter().collect();
    if rows.is_empty() {
        return r#"<p class="notice">No data</p>"#.to_string();
    }
    let max = rows.iter().map(|(_, v, _)| *v).fold(0.0, f64::max);
    let mut out = String::new();
    for (label, value, caption) in rows {
        let width = if max > 0.0 { (value.max(0.0) / max * 100.0).round() } else { 0.0 };
        out.push_str(&format!(
            r#"<div class="bar-row"><span>{}</span><div class="bar" style="width: {}%"></div><span>{}</span></div>"#,
            escape_html(&label),
            width,
            escape_html(&caption)
        ));
    }
    out
}

fn pie_chart(stats: &Statistics) -> String {
    let mut stops = Vec::new();
    let mut legend = String::new();
    let mut start = 0.0;
    for (i, share) in stats.seller_tally.shares.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let end = (start + share.percentage).min(100.0);
        stops.push(format!("{} {:.2}% {:.2}%", color, start, end));
        legend.push_str(&format!(
            r#"<div title="Count: {count}"><span style="background: {color}"></span>{name} ({pct:.2}%)</div>"#,
            count = share.count,
            color = color,
            name = escape_html(&share.seller_name),
            pct = share.percentage
        ));
        start = end;
    }
    format!(
        r#"<div class="pie" style="background: conic-gradient({});"></div><div class="legend">{}</div>"#,
        stops.join(", "),
        legend
    )
}
