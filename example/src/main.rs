use rowmajor::{inner_product, matrix, Matrix};

fn main() {
    let a: Matrix<i32> = matrix![[1, 2], [3, 4]];
    let b: Matrix<i32> = matrix![[5, 6], [7, 8]];

    println!("a + b = {:?}", &a + &b);
    println!("a * b = {:?}", &a * &b);
    println!("2 * a = {:?}", 2i32 * &a);

    // second row of a against the first column of b, by hand
    let d = inner_product(a.row_begin(1), a.row_end(1), b.col_begin(0), 0);
    println!("a[1,:] . b[:,0] = {}", d);

    let mut m = Matrix::<f64>::identity(3);
    for x in m.col_iter_mut(2) {
        *x += 0.5;
    }
    let col: Vec<f64> = m.col_iter(2).copied().collect();
    println!("column 2 = {:?}", col);
    println!("m = {:?}", m);
}
