use crate::models::ReportEntry;

// Page skeleton up to the open table body. Kept verbatim so the generated
// page matches the hand-styled site design.
const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>AI広瀬の米国株決算分析</title>
  <style>
    body { font-family: 'Helvetica Neue', Arial, sans-serif; margin: 0; padding: 0; background-color: #f7f9fc; color: #333; line-height: 1.6; }
    header { background: linear-gradient(60deg, #007bff, #0d47a1); color: #fff; padding: 50px 20px; text-align: center; }
    header h1 { margin: 0; font-size: 2.2rem; }
    header .tagline { margin-top: 10px; font-size: 1.1rem; opacity: 0.85; }
    main { max-width: 960px; margin: 0 auto; padding: 40px 20px; }
    h2 { margin-top: 0; margin-bottom: 15px; color: #0d47a1; border-bottom: 2px solid #007bff; padding-bottom: 4px; font-size: 1.6rem; }
    section { margin-bottom: 40px; }
    p { margin-bottom: 20px; font-size: 0.98rem; }
    ol { margin-left: 20px; margin-bottom: 20px; }
    ol li { margin-bottom: 5px; }
    table { width: 100%; border-collapse: collapse; background-color: #fff; box-shadow: 0 2px 4px rgba(0,0,0,0.05); font-size: 0.92rem; }
    table th, table td { padding: 12px 15px; border-bottom: 1px solid #e0e6ed; vertical-align: middle; }
    table th { background-color: #f3f6fa; text-align: left; font-weight: 600; }
    table tbody tr:nth-child(even) { background-color: #fafbfc; }
    table tbody tr:hover { background-color: #f1f5fa; }
    .good { color: #27ae60; font-weight: 600; }
    .no { color: #c0392b; font-weight: 600; }
    .note { font-size: 0.8rem; color: #666; }
    footer { text-align: center; padding: 25px 10px; background-color: #f3f6fa; color: #444; font-size: 0.85rem; }
    footer a { color: #0d47a1; text-decoration: none; }
  </style>
</head>
<body>
  <header>
    <h1>AI広瀬の米国株決算分析</h1>
    <p class="tagline">個人投資家のための米国株情報サイト</p>
  </header>
  <main>
    <section id="about">
      <h2>サイト概要</h2>
      <p>当サイトは、S&P500 に含まれる米国株を対象に、決算情報と株価を自動収集し、<strong>良い決算</strong>を出した企業を一覧表示します。広瀬隆雄氏が提唱する『良い決算』の条件に基づいて、最新の EPS と売上高が市場予想を上回った銘柄だけを掲載しています。各行では企業名、ティッカー、現在株価、評価結果を確認できます。</p>
    </section>
    <section id="good-earnings">
      <h2>『良い決算』とは？</h2>
      <p>広瀬隆雄氏によると、『良い決算』とは次の 3 つの指標がすべて市場予想（コンセンサス）を上回る決算を指します<sup><a href="#cite-hirosekessan">[1]</a></sup>。</p>
      <ol>
        <li>EPS（1株当たり利益）</li>
        <li>売上高</li>
        <li>会社側ガイダンス（来期・今年度の見通し）</li>
      </ol>
      <p>本サイトではガイダンスデータが取得できないため、1 と 2 の条件を満たす企業を『良い決算』としています。</p>
    </section>
    <section id="table-section">
      <h2>良い決算を出した銘柄一覧</h2>
      <table>
        <thead>
          <tr>
            <th>企業名</th>
            <th>ティッカー</th>
            <th>株価（USD）</th>
            <th>評価結果</th>
          </tr>
        </thead>
        <tbody>"##;

// Close of the table through the open footer.
const TABLE_TAIL: &str = r##"        </tbody>
      </table>
      <p class="note">表に表示されているデータは Finnhub API を使用して生成されています。API は RESTful な JSON 形式でレスポンスを返し、すべての GET リクエストで token パラメータが必要です。API キーの設定方法についてはリポジトリの README を参照してください。</p>
    </section>
    <section id="footnotes">
      <p id="cite-hirosekessan" class="note"><strong>[1]</strong> 良い決算の条件は EPS、売上高、会社ガイダンスが市場予想をすべて上回ること。</p>
    </section>
  </main>
  <footer>"##;

const PAGE_FOOT: &str = r##"  </footer>
</body>
</html>"##;

/// Render the landing page for the given entries. Rows appear in the order
/// supplied; sorting is the caller's concern. Entry fields are inserted
/// without HTML escaping, which is acceptable for ticker symbols and the
/// constrained company-name vocabulary they come with.
pub fn render(entries: &[ReportEntry], year: i32) -> String {
    let mut html =
        String::with_capacity(PAGE_HEAD.len() + TABLE_TAIL.len() + entries.len() * 96 + 256);
    html.push_str(PAGE_HEAD);
    html.push('\n');

    for entry in entries {
        let (class, label) = if entry.good {
            ("good", "良い決算")
        } else {
            ("no", "該当なし")
        };
        html.push_str(&format!(
            "          <tr><td>{}</td><td>{}</td><td>{:.2}</td><td class=\"{}\">{}</td></tr>\n",
            entry.name, entry.symbol, entry.price, class, label
        ));
    }

    html.push_str(TABLE_TAIL);
    html.push('\n');
    html.push_str(&format!(
        "    <p>&copy; {year} AI広瀬の米国株決算分析. All rights reserved.</p>\n"
    ));
    html.push_str(PAGE_FOOT);
    html
}
